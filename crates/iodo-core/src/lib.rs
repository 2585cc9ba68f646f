//! Core of the iodo device diagnostic pipeline.
//!
//! A run captures a [`TelemetrySnapshot`] through the per-subsystem probes,
//! submits it to an [`AnalysisPort`] and, when that is unavailable, classifies
//! it locally with the [`FallbackAnalyzer`]. Platform adapters live in
//! `iodo-runtime`; the HTTP analysis client lives in `iodo-remote`.

#![deny(unused_crate_dependencies)]

pub mod capture;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use capture::{CaptureOrchestrator, Probe, ProbeError, isolate};
pub use domain::{
    AnalysisResult, AnalysisSource, BatteryRecord, CaptureError, Detected, DiagnosticReport,
    EffectiveType, FaultFinding, GraphicsRecord, HeapUsage, IdentityRecord, MetadataRecord,
    NetworkRecord, OsVersion, PerformanceRecord, SensorRecord, Severity, StorageEstimate,
    StorageRecord, Subsystem, TelemetrySnapshot, codes,
};
pub use ports::{
    AnalysisError, AnalysisPort, Capabilities, CapabilityError, CapabilityResult, NoRemoteAnalysis,
};
pub use services::{DiagnosticError, DiagnosticService, FallbackAnalyzer, HeuristicRule};

#[cfg(test)]
use tokio_test as _;
