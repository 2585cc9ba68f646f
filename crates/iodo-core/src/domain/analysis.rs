//! Analysis result types shared by the remote service and the fallback engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable fault codes produced by the fallback heuristics.
pub mod codes {
    pub const BATT_LOW: &str = "BATT_LOW";
    pub const PERF_SLOW: &str = "PERF_SLOW";
    pub const GFX_WEBGL_FAIL: &str = "GFX_WEBGL_FAIL";
    pub const NET_SLOW: &str = "NET_SLOW";
    pub const IOS_OUTDATED: &str = "IOS_OUTDATED";
}

/// Severity of a fault finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultFinding {
    /// Stable identifier, e.g. `BATT_LOW`.
    pub code: String,
    pub severity: Severity,
    pub message: String,
}

impl FaultFinding {
    pub fn new(code: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
        }
    }
}

/// Findings plus a one-sentence summary.
///
/// An empty `faults` list is a valid result and means the device looks healthy.
/// Finding order reflects evaluation order, not severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub faults: Vec<FaultFinding>,
    pub summary: String,
}

impl AnalysisResult {
    pub fn is_healthy(&self) -> bool {
        self.faults.is_empty()
    }

    /// Highest severity among the findings, if any.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.faults.iter().map(|f| f.severity).max()
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.faults.iter().any(|f| f.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_remote_payload() {
        let json = r#"{
            "faults": [{"code": "THERMAL", "severity": "high", "message": "Hot"}],
            "summary": "1 issue"
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.faults.len(), 1);
        assert_eq!(result.faults[0].severity, Severity::High);
        assert!(result.has_code("THERMAL"));
    }

    #[test]
    fn test_rejects_unknown_severity() {
        let json = r#"{"faults": [{"code": "X", "severity": "fatal", "message": ""}], "summary": ""}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_worst_severity() {
        let result = AnalysisResult {
            faults: vec![
                FaultFinding::new(codes::NET_SLOW, Severity::Low, "slow"),
                FaultFinding::new(codes::BATT_LOW, Severity::Medium, "battery"),
            ],
            summary: String::new(),
        };
        assert_eq!(result.worst_severity(), Some(Severity::Medium));
        assert!(!result.is_healthy());

        let healthy = AnalysisResult {
            faults: vec![],
            summary: String::new(),
        };
        assert_eq!(healthy.worst_severity(), None);
        assert!(healthy.is_healthy());
    }
}
