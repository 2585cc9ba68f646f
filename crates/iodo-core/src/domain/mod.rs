//! Domain types for the capture-and-diagnose pipeline.
//!
//! These are pure data types with serde support. They carry no I/O and no
//! knowledge of where the telemetry came from.

pub mod analysis;
pub mod detected;
pub mod identity;
pub mod report;
pub mod snapshot;

pub use analysis::{AnalysisResult, FaultFinding, Severity, codes};
pub use detected::{Detected, UNKNOWN};
pub use identity::{
    BrowserFamily, OsVersion, PlatformFamily, classify_browser, classify_platform,
    parse_os_version,
};
pub use report::{AnalysisSource, DiagnosticReport};
pub use snapshot::{
    BatteryRecord, CaptureError, EffectiveType, GraphicsRecord, HeapUsage, IdentityRecord,
    MetadataRecord, NetworkRecord, PerformanceRecord, SensorRecord, StorageEstimate,
    StorageRecord, Subsystem, TelemetrySnapshot,
};
