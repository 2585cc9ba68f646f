//! Core services: analysis and report assembly on top of the capture layer.
//!
//! Services here are orchestrators over ports; they never know which
//! concrete platform or analysis backend they talk to.

mod diagnostics;
mod fallback;

pub use diagnostics::{DiagnosticError, DiagnosticService};
pub use fallback::{
    FallbackAnalyzer, HeuristicRule, LOW_BATTERY_THRESHOLD, MIN_SUPPORTED_IOS_MAJOR,
    SLOW_LOAD_THRESHOLD_MS, default_rules,
};
