//! Diagnostic Report Assembler.
//!
//! Runs one capture, asks the analysis port for a verdict and falls back to
//! the local heuristics when the remote path is unavailable.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::fallback::FallbackAnalyzer;
use crate::capture::{CaptureOrchestrator, panic_message};
use crate::domain::{AnalysisResult, AnalysisSource, DiagnosticReport, TelemetrySnapshot};
use crate::ports::{AnalysisPort, Capabilities};

/// Failures that abort a diagnostic run.
///
/// Capture failures never show up here; they live in the snapshot's error
/// log. Only a fault inside the fallback engine itself is fatal.
#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("Fallback analysis failed: {message}")]
    AnalyzerFault { message: String },
}

/// Assembles a [`DiagnosticReport`] from one capture and one analysis.
pub struct DiagnosticService {
    orchestrator: CaptureOrchestrator,
    remote: Arc<dyn AnalysisPort>,
    fallback: FallbackAnalyzer,
}

impl DiagnosticService {
    /// Service over the standard probes and default fallback rules.
    pub fn new(capabilities: &Capabilities, remote: Arc<dyn AnalysisPort>) -> Self {
        Self::with_parts(
            CaptureOrchestrator::new(capabilities),
            remote,
            FallbackAnalyzer::new(),
        )
    }

    pub fn with_parts(
        orchestrator: CaptureOrchestrator,
        remote: Arc<dyn AnalysisPort>,
        fallback: FallbackAnalyzer,
    ) -> Self {
        Self {
            orchestrator,
            remote,
            fallback,
        }
    }

    /// Capture, analyze and assemble one report.
    ///
    /// The remote analyzer gets exactly one attempt. When it is unavailable
    /// the fallback analysis of the same snapshot is used instead.
    pub async fn run(&self) -> Result<DiagnosticReport, DiagnosticError> {
        info!("Starting diagnostic run");
        let snapshot = self.orchestrator.run().await;

        let (analysis, analysis_source) = match self.remote.analyze(&snapshot).await {
            Ok(result) => (result, AnalysisSource::Remote),
            Err(err) => {
                warn!(error = %err, "Remote analysis unavailable, using fallback heuristics");
                (self.analyze_locally(&snapshot)?, AnalysisSource::Fallback)
            }
        };

        info!(
            source = ?analysis_source,
            faults = analysis.faults.len(),
            capture_errors = snapshot.errors.len(),
            "Diagnostic run complete"
        );

        Ok(DiagnosticReport {
            snapshot,
            analysis,
            analysis_source,
        })
    }

    fn analyze_locally(
        &self,
        snapshot: &TelemetrySnapshot,
    ) -> Result<AnalysisResult, DiagnosticError> {
        catch_unwind(AssertUnwindSafe(|| self.fallback.analyze(snapshot))).map_err(|payload| {
            DiagnosticError::AnalyzerFault {
                message: panic_message(payload.as_ref()),
            }
        })
    }
}
