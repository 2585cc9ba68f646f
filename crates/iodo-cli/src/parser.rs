//! Root CLI structure and global options.

use clap::{Parser, ValueEnum};
use iodo_remote::DEFAULT_ORIGIN;

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable fault list
    #[default]
    Text,
    /// The full report as pretty-printed JSON
    Json,
}

/// Non-invasive device diagnostics.
///
/// Captures a telemetry snapshot of this machine, asks the analysis service
/// for a verdict and falls back to local heuristics when it is unreachable.
#[derive(Debug, Parser)]
#[command(name = "iodo")]
#[command(about = "Run a device diagnosis and report likely faults")]
#[command(version)]
pub struct Cli {
    /// Origin of the analysis service
    #[arg(long, env = "IODO_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Timeout for the analysis request, in seconds
    #[arg(long = "timeout-secs", env = "IODO_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Skip the analysis service and use local heuristics only
    #[arg(long, env = "IODO_OFFLINE")]
    pub offline: bool,

    /// Report this identity string instead of the host's
    #[arg(long, env = "IODO_IDENTITY")]
    pub identity: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::parse_from([
            "iodo",
            "--origin",
            "https://diag.example",
            "--timeout-secs",
            "5",
            "--offline",
            "--identity",
            "CPU iPhone OS 14_2 like Mac OS X",
            "--format",
            "json",
            "-v",
        ]);
        assert_eq!(cli.origin, "https://diag.example");
        assert_eq!(cli.timeout_secs, 5);
        assert!(cli.offline);
        assert_eq!(cli.identity.as_deref(), Some("CPU iPhone OS 14_2 like Mac OS X"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["iodo", "--format", "yaml"]).is_err());
    }
}
