//! CLI entry point.

use std::io::Write as _;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use iodo_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match iodo_cli::run(cli).await {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{output}")?;
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}
