//! Local heuristic analysis used when the remote analyzer is unavailable.
//!
//! Every rule is a pure predicate over the snapshot. A rule whose input
//! field is absent does not fire; it is never an error.

use std::fmt;

use crate::domain::{
    AnalysisResult, Detected, EffectiveType, FaultFinding, Severity, TelemetrySnapshot, codes,
};

/// Battery level below which an unplugged device is flagged.
pub const LOW_BATTERY_THRESHOLD: f64 = 0.20;

/// Load time (ms) above which the device is considered sluggish.
pub const SLOW_LOAD_THRESHOLD_MS: i64 = 5_000;

/// Oldest iOS major version not flagged as outdated.
pub const MIN_SUPPORTED_IOS_MAJOR: u32 = 15;

/// One fallback heuristic: a predicate plus the finding it produces.
#[derive(Clone, Copy)]
pub struct HeuristicRule {
    pub code: &'static str,
    pub severity: Severity,
    pub applies: fn(&TelemetrySnapshot) -> bool,
    pub message: fn(&TelemetrySnapshot) -> String,
}

impl HeuristicRule {
    /// Evaluate this rule, returning a finding when it fires.
    pub fn evaluate(&self, snapshot: &TelemetrySnapshot) -> Option<FaultFinding> {
        (self.applies)(snapshot)
            .then(|| FaultFinding::new(self.code, self.severity, (self.message)(snapshot)))
    }
}

impl fmt::Debug for HeuristicRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeuristicRule")
            .field("code", &self.code)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

fn battery_low(snapshot: &TelemetrySnapshot) -> bool {
    let battery = &snapshot.battery;
    matches!(
        (battery.level, battery.charging),
        (Some(level), Some(false)) if level < LOW_BATTERY_THRESHOLD
    )
}

fn performance_slow(snapshot: &TelemetrySnapshot) -> bool {
    snapshot
        .performance
        .load_time
        .is_some_and(|ms| ms > SLOW_LOAD_THRESHOLD_MS)
}

fn webgl_failed(snapshot: &TelemetrySnapshot) -> bool {
    snapshot.graphics.webgl == Some(false)
}

fn network_slow(snapshot: &TelemetrySnapshot) -> bool {
    snapshot
        .network
        .effective_type
        .is_some_and(EffectiveType::is_slowest)
}

fn ios_outdated(snapshot: &TelemetrySnapshot) -> bool {
    matches!(
        snapshot.identity.os_version,
        Some(Detected::Known(version)) if version.major < MIN_SUPPORTED_IOS_MAJOR
    )
}

fn ios_outdated_message(snapshot: &TelemetrySnapshot) -> String {
    let version = snapshot
        .identity
        .os_version
        .and_then(Detected::known)
        .map_or_else(|| "unknown".to_string(), |v| v.to_string());
    format!(
        "iOS version {version} is significantly outdated. \
         This poses security risks and may cause app compatibility issues."
    )
}

/// The five built-in rules, in evaluation order.
pub fn default_rules() -> Vec<HeuristicRule> {
    vec![
        HeuristicRule {
            code: codes::BATT_LOW,
            severity: Severity::Medium,
            applies: battery_low,
            message: |_| {
                "Battery level critically low. This can cause unexpected shutdowns.".to_string()
            },
        },
        HeuristicRule {
            code: codes::PERF_SLOW,
            severity: Severity::Low,
            applies: performance_slow,
            message: |_| {
                "Device performance seems sluggish. \
                 Could be due to many open apps or memory pressure."
                    .to_string()
            },
        },
        HeuristicRule {
            code: codes::GFX_WEBGL_FAIL,
            severity: Severity::High,
            applies: webgl_failed,
            message: |_| {
                "WebGL is not supported. This may indicate a severe graphics subsystem \
                 issue or outdated iOS version."
                    .to_string()
            },
        },
        HeuristicRule {
            code: codes::NET_SLOW,
            severity: Severity::Low,
            applies: network_slow,
            message: |_| "Network connection is very slow.".to_string(),
        },
        HeuristicRule {
            code: codes::IOS_OUTDATED,
            severity: Severity::High,
            applies: ios_outdated,
            message: ios_outdated_message,
        },
    ]
}

/// Deterministic rule engine over a telemetry snapshot.
#[derive(Debug, Clone)]
pub struct FallbackAnalyzer {
    rules: Vec<HeuristicRule>,
}

impl Default for FallbackAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackAnalyzer {
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub const fn with_rules(rules: Vec<HeuristicRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[HeuristicRule] {
        &self.rules
    }

    /// Evaluate every rule in order. Same snapshot, same result.
    pub fn analyze(&self, snapshot: &TelemetrySnapshot) -> AnalysisResult {
        let faults: Vec<FaultFinding> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(snapshot))
            .collect();
        let summary = format!(
            "Fallback analysis found {} potential issue(s).",
            faults.len()
        );
        AnalysisResult { faults, summary }
    }
}
