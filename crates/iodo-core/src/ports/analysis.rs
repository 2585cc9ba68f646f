//! Analysis port: the contract the core expects from a remote analyzer.

use crate::domain::{AnalysisResult, TelemetrySnapshot};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from an analysis port.
///
/// Any failure of the remote path collapses into `RemoteUnavailable`; the
/// caller treats it as the signal to run the fallback heuristics.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Remote analysis unavailable: {reason}")]
    RemoteUnavailable { reason: String },
}

impl AnalysisError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::RemoteUnavailable {
            reason: reason.into(),
        }
    }
}

/// Port for submitting a snapshot to an external analysis service.
///
/// Implementations make a single attempt per call; there is no retry.
#[async_trait]
pub trait AnalysisPort: Send + Sync {
    async fn analyze(&self, snapshot: &TelemetrySnapshot) -> Result<AnalysisResult, AnalysisError>;
}

/// Analysis port for offline runs: always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRemoteAnalysis;

#[async_trait]
impl AnalysisPort for NoRemoteAnalysis {
    async fn analyze(&self, _snapshot: &TelemetrySnapshot) -> Result<AnalysisResult, AnalysisError> {
        Err(AnalysisError::unavailable("remote analysis disabled"))
    }
}
