//! Telemetry snapshot domain types.
//!
//! A [`TelemetrySnapshot`] is fixed-shape: every subsystem record is always
//! present, even when its probe failed. Records start empty and probes fill
//! them field by field, so a probe that fails half way leaves its partial
//! writes next to the Capture Error it produced.

use super::detected::Detected;
use super::identity::{BrowserFamily, OsVersion, PlatformFamily};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subsystems captured by a diagnostic run, in capture order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    Metadata,
    Identity,
    Network,
    Storage,
    Battery,
    Performance,
    Graphics,
    Sensors,
}

impl Subsystem {
    /// Every subsystem, in the order the orchestrator runs their probes.
    pub const ALL: [Self; 8] = [
        Self::Metadata,
        Self::Identity,
        Self::Network,
        Self::Storage,
        Self::Battery,
        Self::Performance,
        Self::Graphics,
        Self::Sensors,
    ];

    /// Key of this subsystem's record in the serialized snapshot.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Identity => "identity",
            Self::Network => "network",
            Self::Storage => "storage",
            Self::Battery => "battery",
            Self::Performance => "performance",
            Self::Graphics => "graphics",
            Self::Sensors => "sensors",
        }
    }

    /// Module name used in Capture Errors raised by this subsystem's probe.
    pub const fn module(self) -> &'static str {
        match self {
            Self::Metadata => "Metadata",
            Self::Identity => "Identity",
            Self::Network => "Network",
            Self::Storage => "Storage",
            Self::Battery => "Battery",
            Self::Performance => "Performance",
            Self::Graphics => "Graphics",
            Self::Sensors => "Sensors",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Static platform identity fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Detected<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Detected<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Detected<String>>,
    /// Installed memory in GiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_memory: Option<Detected<f64>>,
    /// Logical processor count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_concurrency: Option<Detected<u32>>,
}

/// Parsed client identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdentityRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_family: Option<PlatformFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<BrowserFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<Detected<OsVersion>>,
}

/// Effective connection class, slowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectiveType {
    #[serde(rename = "slow-2g")]
    Slow2g,
    #[serde(rename = "2g")]
    TwoG,
    #[serde(rename = "3g")]
    ThreeG,
    #[serde(rename = "4g")]
    FourG,
}

impl EffectiveType {
    /// Classify a downlink bandwidth (Mbit/s) into a connection class.
    pub fn from_downlink_mbps(mbps: f64) -> Self {
        if mbps < 0.05 {
            Self::Slow2g
        } else if mbps < 0.07 {
            Self::TwoG
        } else if mbps < 0.7 {
            Self::ThreeG
        } else {
            Self::FourG
        }
    }

    pub const fn is_slowest(self) -> bool {
        matches!(self, Self::Slow2g)
    }
}

/// Connection quality, or the reason it could not be read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkRecord {
    /// Downlink bandwidth in Mbit/s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downlink: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_type: Option<EffectiveType>,
    /// Round-trip time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtt: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_data: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<Detected<String>>,
    /// Recorded limitation when the platform has no connection information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Storage quota estimate in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEstimate {
    pub quota: u64,
    pub usage: u64,
}

/// Storage capability availability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageRecord {
    /// Storage that survives restarts is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,
    /// Storage scoped to the current session is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Detected<StorageEstimate>>,
}

/// Power state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatteryRecord {
    /// Charge level in `0.0..=1.0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging: Option<bool>,
    /// Seconds until full; absent when unknown or not charging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_time: Option<f64>,
    /// Seconds until empty; absent when unknown or charging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharging_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Memory usage of the running client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeapUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

/// Load timing markers and derived metrics, all in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_event_end: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom_complete: Option<u64>,
    /// `load_event_end - navigation_start`; negative while loading is unfinished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_time: Option<i64>,
    /// `dom_complete - dom_loading`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom_ready_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<Detected<HeapUsage>>,
}

/// Rendering capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphicsRecord {
    /// A hardware rendering context could be created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webgl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<Detected<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Detected<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shader_compile_success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Motion sensor and touch support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SensorRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerometer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gyroscope: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub touch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_touch_points: Option<u32>,
}

/// A non-fatal fault raised by one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureError {
    pub module: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl CaptureError {
    pub fn new(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            message: message.into(),
            stack: None,
        }
    }

    /// Build a Capture Error from an error, keeping its source chain as the stack.
    pub fn from_error(module: impl Into<String>, error: &(dyn std::error::Error + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        Self {
            module: module.into(),
            message: error.to_string(),
            stack: (!chain.is_empty()).then(|| chain.join("\n")),
        }
    }
}

/// Fixed-shape aggregate of everything captured in one diagnostic run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySnapshot {
    pub metadata: MetadataRecord,
    pub identity: IdentityRecord,
    pub network: NetworkRecord,
    pub storage: StorageRecord,
    pub battery: BatteryRecord,
    pub performance: PerformanceRecord,
    pub graphics: GraphicsRecord,
    pub sensors: SensorRecord,
    pub errors: Vec<CaptureError>,
}

impl TelemetrySnapshot {
    /// Create an empty snapshot with every subsystem record present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a Capture Error. Errors are never removed during a run.
    pub fn record_error(&mut self, error: CaptureError) {
        self.errors.push(error);
    }

    /// Capture Errors raised by the given module, in the order they occurred.
    pub fn errors_for<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a CaptureError> {
        self.errors.iter().filter(move |e| e.module == module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_empty_snapshot_has_every_subsystem_key() {
        let json = serde_json::to_value(TelemetrySnapshot::new()).unwrap();
        let object = json.as_object().unwrap();

        for subsystem in Subsystem::ALL {
            assert!(
                object.get(subsystem.key()).is_some_and(Value::is_object),
                "missing {subsystem}"
            );
        }
        assert!(object["errors"].as_array().unwrap().is_empty());
        assert_eq!(object.len(), Subsystem::ALL.len() + 1);
    }

    #[test]
    fn test_records_use_camel_case_on_the_wire() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.network.effective_type = Some(EffectiveType::Slow2g);
        snapshot.network.connection_type = Some(Detected::Known("wifi".to_string()));
        snapshot.graphics.shader_compile_success = Some(true);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["network"]["effectiveType"], "slow-2g");
        assert_eq!(json["network"]["type"], "wifi");
        assert_eq!(json["graphics"]["shaderCompileSuccess"], true);
    }

    #[test]
    fn test_snapshot_survives_a_wire_trip() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.identity.os_version = Some(Detected::Known(OsVersion::new(14, 4, 0)));
        snapshot.storage.estimate = Some(Detected::Unknown);
        snapshot.record_error(CaptureError::new("Sensors", "boom"));

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_effective_type_thresholds() {
        assert_eq!(EffectiveType::from_downlink_mbps(0.01), EffectiveType::Slow2g);
        assert_eq!(EffectiveType::from_downlink_mbps(0.06), EffectiveType::TwoG);
        assert_eq!(EffectiveType::from_downlink_mbps(0.5), EffectiveType::ThreeG);
        assert_eq!(EffectiveType::from_downlink_mbps(1000.0), EffectiveType::FourG);
        assert!(EffectiveType::Slow2g.is_slowest());
        assert!(!EffectiveType::TwoG.is_slowest());
    }

    #[test]
    fn test_capture_error_keeps_source_chain() {
        #[derive(Debug, thiserror::Error)]
        #[error("outer")]
        struct Outer(#[source] std::io::Error);

        let err = Outer(std::io::Error::other("inner"));
        let capture = CaptureError::from_error("Storage", &err);
        assert_eq!(capture.module, "Storage");
        assert_eq!(capture.message, "outer");
        assert_eq!(capture.stack.as_deref(), Some("caused by: inner"));
    }
}
