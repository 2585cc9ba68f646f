//! Capability ports: one small provider trait per telemetry subsystem.
//!
//! Each trait is the capability-detection boundary for its subsystem. A
//! provider reports `CapabilityError::Unsupported` when the platform does not
//! expose the capability at all; probes record that as a limitation rather
//! than a fault. Host implementations live in `iodo-runtime`.

use crate::domain::{EffectiveType, HeapUsage, StorageEstimate};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors reported by a capability provider.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The platform does not expose this capability.
    #[error("{capability} is not supported on this platform")]
    Unsupported { capability: &'static str },

    /// The capability exists but the platform refused the query.
    #[error("Permission denied reading {capability}")]
    PermissionDenied { capability: &'static str },

    /// The capability exists but reading it failed.
    #[error("Failed to read {capability}: {message}")]
    Query {
        capability: &'static str,
        message: String,
    },
}

impl CapabilityError {
    pub const fn unsupported(capability: &'static str) -> Self {
        Self::Unsupported { capability }
    }

    pub fn query(capability: &'static str, message: impl Into<String>) -> Self {
        Self::Query {
            capability,
            message: message.into(),
        }
    }

    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Result type for capability reads.
pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Static platform identity as reported by the provider.
///
/// `None` means the environment does not support that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceMetadata {
    pub platform: Option<String>,
    pub vendor: Option<String>,
    pub language: Option<String>,
    pub device_memory_gb: Option<f64>,
    pub hardware_concurrency: Option<u32>,
}

/// Connection quality fields exposed by a connection-info capability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionInfo {
    pub downlink_mbps: Option<f64>,
    pub effective_type: Option<EffectiveType>,
    pub rtt_ms: Option<u32>,
    pub save_data: Option<bool>,
    pub connection_type: Option<String>,
}

/// Availability of the two storage capabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageAvailability {
    pub persistent: bool,
    pub session: bool,
}

/// Power-status query result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerStatus {
    /// Charge level in `0.0..=1.0`.
    pub level: f64,
    pub charging: bool,
    pub charging_time_secs: Option<f64>,
    pub discharging_time_secs: Option<f64>,
}

/// Load timing markers in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationTiming {
    pub navigation_start: u64,
    pub dom_loading: u64,
    pub dom_complete: u64,
    pub load_event_end: u64,
}

/// Renderer identification from the debug-info capability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererInfo {
    pub renderer: String,
    pub vendor: String,
}

/// Motion sensor classes and touch support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorCapabilities {
    pub accelerometer: bool,
    pub gyroscope: bool,
    pub orientation: bool,
    pub touch: bool,
    pub max_touch_points: Option<u32>,
}

pub trait MetadataSource: Send + Sync {
    fn read_metadata(&self) -> CapabilityResult<DeviceMetadata>;
}

pub trait IdentitySource: Send + Sync {
    /// Raw client identity string.
    fn identity_string(&self) -> CapabilityResult<String>;
}

#[async_trait]
pub trait NetworkSource: Send + Sync {
    async fn connection(&self) -> CapabilityResult<ConnectionInfo>;
}

#[async_trait]
pub trait StorageSource: Send + Sync {
    fn availability(&self) -> CapabilityResult<StorageAvailability>;

    /// Quota estimate. This may suspend on a platform query.
    async fn estimate(&self) -> CapabilityResult<StorageEstimate>;
}

#[async_trait]
pub trait PowerSource: Send + Sync {
    async fn status(&self) -> CapabilityResult<PowerStatus>;
}

pub trait TimingSource: Send + Sync {
    fn navigation_timing(&self) -> CapabilityResult<NavigationTiming>;

    /// Best-effort heap reading; `Unsupported` when the platform has none.
    fn heap_usage(&self) -> CapabilityResult<HeapUsage>;
}

/// An open rendering context.
pub trait RenderContext: Send {
    /// Renderer strings from the optional debug-info capability.
    fn renderer_info(&self) -> CapabilityResult<RendererInfo>;

    /// Compile a minimal vertex shader and report whether it succeeded.
    fn compile_probe_shader(&self) -> CapabilityResult<bool>;
}

pub trait GraphicsSource: Send + Sync {
    /// `Unsupported` when no rendering context can be created.
    fn create_context(&self) -> CapabilityResult<Box<dyn RenderContext>>;
}

pub trait SensorSource: Send + Sync {
    fn sensors(&self) -> CapabilityResult<SensorCapabilities>;
}

/// Container for every capability provider a capture run needs.
///
/// Adapters build one of these (see `HostPlatform` in `iodo-runtime`) and
/// hand it to the orchestrator without the core knowing the concrete types.
#[derive(Clone)]
pub struct Capabilities {
    pub metadata: Arc<dyn MetadataSource>,
    pub identity: Arc<dyn IdentitySource>,
    pub network: Arc<dyn NetworkSource>,
    pub storage: Arc<dyn StorageSource>,
    pub power: Arc<dyn PowerSource>,
    pub timing: Arc<dyn TimingSource>,
    pub graphics: Arc<dyn GraphicsSource>,
    pub sensors: Arc<dyn SensorSource>,
}

impl Capabilities {
    /// Use one value that implements every capability for all subsystems.
    pub fn from_platform<P>(platform: Arc<P>) -> Self
    where
        P: MetadataSource
            + IdentitySource
            + NetworkSource
            + StorageSource
            + PowerSource
            + TimingSource
            + GraphicsSource
            + SensorSource
            + 'static,
    {
        Self {
            metadata: platform.clone(),
            identity: platform.clone(),
            network: platform.clone(),
            storage: platform.clone(),
            power: platform.clone(),
            timing: platform.clone(),
            graphics: platform.clone(),
            sensors: platform,
        }
    }
}
