//! CLI bootstrap: the composition root.
//!
//! This is the only place where the host platform and the analysis port are
//! chosen and wired into a `DiagnosticService`.

use std::sync::Arc;
use std::time::Duration;

use iodo_core::{AnalysisPort, Capabilities, DiagnosticService, NoRemoteAnalysis};
use iodo_remote::{DefaultRemoteClient, RemoteClientConfig};
use iodo_runtime::HostPlatform;
use tracing::info;

use crate::error::CliError;
use crate::parser::Cli;

/// Everything the composition root needs from the command line.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub origin: String,
    pub timeout: Duration,
    pub offline: bool,
    pub identity: Option<String>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            origin: cli.origin,
            timeout: Duration::from_secs(cli.timeout_secs),
            offline: cli.offline,
            identity: cli.identity,
        }
    }
}

impl CliConfig {
    /// Analysis port for this configuration.
    pub fn analysis_port(&self) -> Result<Arc<dyn AnalysisPort>, CliError> {
        if self.offline {
            return Ok(Arc::new(NoRemoteAnalysis));
        }
        let config = RemoteClientConfig::new()
            .with_origin(&self.origin)
            .with_timeout(self.timeout);
        Ok(Arc::new(DefaultRemoteClient::new(&config)?))
    }

    pub fn capabilities(&self) -> Capabilities {
        HostPlatform::new()
            .with_identity(self.identity.clone())
            .capabilities()
    }
}

/// Compose the diagnostic service for the host.
pub fn bootstrap(config: &CliConfig) -> Result<DiagnosticService, CliError> {
    let remote = config.analysis_port()?;
    info!(
        origin = %config.origin,
        offline = config.offline,
        "Composed diagnostic service"
    );
    Ok(DiagnosticService::new(&config.capabilities(), remote))
}
