//! The unit handed to the presentation layer.

use super::analysis::AnalysisResult;
use super::snapshot::TelemetrySnapshot;
use serde::{Deserialize, Serialize};

/// Which path produced the analysis attached to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Remote,
    Fallback,
}

/// Snapshot, its error log and the analysis of one diagnostic run.
///
/// Serializes as the snapshot's keys plus `analysis` and `analysisSource`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    #[serde(flatten)]
    pub snapshot: TelemetrySnapshot,
    pub analysis: AnalysisResult,
    pub analysis_source: AnalysisSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_flattens_snapshot() {
        let report = DiagnosticReport {
            snapshot: TelemetrySnapshot::new(),
            analysis: AnalysisResult {
                faults: vec![],
                summary: "ok".to_string(),
            },
            analysis_source: AnalysisSource::Fallback,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["metadata"].is_object());
        assert!(json["errors"].is_array());
        assert_eq!(json["analysis"]["summary"], "ok");
        assert_eq!(json["analysisSource"], "fallback");
    }
}
