//! CLI-specific error types and exit codes.

use iodo_core::DiagnosticError;
use iodo_remote::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The run could not produce a report at all.
    #[error("Execution error: {0}")]
    Execution(String),

    /// Flags or environment describe an unusable setup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The report could not be rendered.
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Map error to an exit code (sysexits.h where one fits).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Execution(_) => 1,
            Self::Output(_) => 74, // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

impl From<DiagnosticError> for CliError {
    fn from(err: DiagnosticError) -> Self {
        Self::Execution(err.to_string())
    }
}

impl From<RemoteError> for CliError {
    fn from(err: RemoteError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}
