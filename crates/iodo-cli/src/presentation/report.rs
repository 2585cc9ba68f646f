//! Text and JSON renderings of a diagnostic report.

use std::fmt::Write as _;

use iodo_core::{AnalysisSource, DiagnosticReport, FaultFinding};

use crate::error::CliError;

/// Shown when the analysis found nothing.
pub const HEALTHY_MESSAGE: &str = "No significant issues detected. Device appears healthy.";

/// Human-readable report: issues, summary, analysis source, capture errors.
pub fn render_text(report: &DiagnosticReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Diagnostic Report");
    if let Some(timestamp) = report.snapshot.metadata.timestamp {
        let _ = writeln!(out, "Generated: {}", timestamp.to_rfc3339());
    }

    let _ = writeln!(out, "\nDetected Issues");
    if report.analysis.faults.is_empty() {
        let _ = writeln!(out, "  {HEALTHY_MESSAGE}");
    } else {
        for fault in &report.analysis.faults {
            write_fault(&mut out, fault);
        }
    }

    let _ = writeln!(out, "\nSummary: {}", report.analysis.summary);
    let _ = writeln!(out, "Analysis source: {}", source_label(report.analysis_source));

    let errors = &report.snapshot.errors;
    if !errors.is_empty() {
        let _ = writeln!(out, "\nCapture errors ({})", errors.len());
        for error in errors {
            let _ = writeln!(out, "  {}: {}", error.module, error.message);
        }
    }

    out
}

fn write_fault(out: &mut String, fault: &FaultFinding) {
    let _ = writeln!(
        out,
        "  [{}] {}",
        fault.severity.as_str().to_uppercase(),
        fault.code
    );
    let _ = writeln!(out, "      {}", fault.message);
}

const fn source_label(source: AnalysisSource) -> &'static str {
    match source {
        AnalysisSource::Remote => "remote analysis service",
        AnalysisSource::Fallback => "local fallback heuristics",
    }
}

/// The full report, snapshot included, as pretty-printed JSON.
pub fn render_json(report: &DiagnosticReport) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(report)?)
}
