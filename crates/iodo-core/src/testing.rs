//! In-memory capability providers for tests.
//!
//! `FakePlatform` implements every capability port from plain data, so tests
//! can simulate the presence, absence or failure of each capability without
//! a real execution environment. Enabled for downstream crates with the
//! `test-utils` feature.

use crate::domain::{EffectiveType, HeapUsage, StorageEstimate};
use crate::ports::{
    Capabilities, CapabilityError, CapabilityResult, ConnectionInfo, DeviceMetadata,
    GraphicsSource, IdentitySource, MetadataSource, NavigationTiming, NetworkSource, PowerSource,
    PowerStatus, RenderContext, RendererInfo, SensorCapabilities, SensorSource,
    StorageAvailability, StorageSource, TimingSource,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Identity string of the healthy fake device.
pub const HEALTHY_IDENTITY: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) \
    AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1";

/// Canned outcome of one capability read.
#[derive(Debug, Clone)]
pub enum Reading<T> {
    Value(T),
    Unsupported,
    Denied,
    Failed(String),
    /// Panic with this message when read.
    Panics(String),
}

impl<T: Clone> Reading<T> {
    /// Replay this reading for the named capability.
    pub fn read(&self, capability: &'static str) -> CapabilityResult<T> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Unsupported => Err(CapabilityError::Unsupported { capability }),
            Self::Denied => Err(CapabilityError::PermissionDenied { capability }),
            Self::Failed(message) => Err(CapabilityError::query(capability, message.clone())),
            Self::Panics(message) => panic!("{message}"),
        }
    }
}

/// A rendering context built from canned readings.
#[derive(Debug, Clone)]
pub struct FakeRenderer {
    pub info: Reading<RendererInfo>,
    pub shader_compiles: Reading<bool>,
}

impl Default for FakeRenderer {
    fn default() -> Self {
        Self {
            info: Reading::Value(RendererInfo {
                renderer: "Apple GPU".to_string(),
                vendor: "Apple Inc.".to_string(),
            }),
            shader_compiles: Reading::Value(true),
        }
    }
}

impl RenderContext for FakeRenderer {
    fn renderer_info(&self) -> CapabilityResult<RendererInfo> {
        self.info.read("renderer debug info")
    }

    fn compile_probe_shader(&self) -> CapabilityResult<bool> {
        self.shader_compiles.read("shader compiler")
    }
}

/// Every capability of a device, as plain data.
#[derive(Debug, Clone)]
pub struct FakePlatform {
    pub metadata: Reading<DeviceMetadata>,
    pub identity: Reading<String>,
    pub connection: Reading<ConnectionInfo>,
    pub storage: Reading<StorageAvailability>,
    pub estimate: Reading<StorageEstimate>,
    pub power: Reading<PowerStatus>,
    pub timing: Reading<NavigationTiming>,
    pub heap: Reading<HeapUsage>,
    pub graphics: Reading<FakeRenderer>,
    pub sensors: Reading<SensorCapabilities>,
}

impl FakePlatform {
    /// A fully capable device with nothing wrong with it.
    pub fn healthy() -> Self {
        Self {
            metadata: Reading::Value(DeviceMetadata {
                platform: Some("iPhone".to_string()),
                vendor: Some("Apple Computer, Inc.".to_string()),
                language: Some("en-US".to_string()),
                device_memory_gb: Some(4.0),
                hardware_concurrency: Some(6),
            }),
            identity: Reading::Value(HEALTHY_IDENTITY.to_string()),
            connection: Reading::Value(ConnectionInfo {
                downlink_mbps: Some(10.0),
                effective_type: Some(EffectiveType::FourG),
                rtt_ms: Some(50),
                save_data: Some(false),
                connection_type: Some("wifi".to_string()),
            }),
            storage: Reading::Value(StorageAvailability {
                persistent: true,
                session: true,
            }),
            estimate: Reading::Value(StorageEstimate {
                quota: 64 * 1024 * 1024 * 1024,
                usage: 2 * 1024 * 1024 * 1024,
            }),
            power: Reading::Value(PowerStatus {
                level: 0.8,
                charging: true,
                charging_time_secs: Some(1_800.0),
                discharging_time_secs: None,
            }),
            timing: Reading::Value(NavigationTiming {
                navigation_start: 1_700_000_000_000,
                dom_loading: 1_700_000_000_150,
                dom_complete: 1_700_000_000_900,
                load_event_end: 1_700_000_001_200,
            }),
            heap: Reading::Value(HeapUsage {
                used_bytes: 24 * 1024 * 1024,
                total_bytes: 64 * 1024 * 1024,
            }),
            graphics: Reading::Value(FakeRenderer::default()),
            sensors: Reading::Value(SensorCapabilities {
                accelerometer: true,
                gyroscope: true,
                orientation: true,
                touch: true,
                max_touch_points: Some(5),
            }),
        }
    }

    /// A device that exposes no optional capability at all.
    pub fn unsupported() -> Self {
        Self {
            metadata: Reading::Value(DeviceMetadata::default()),
            identity: Reading::Value(String::new()),
            connection: Reading::Unsupported,
            storage: Reading::Value(StorageAvailability::default()),
            estimate: Reading::Unsupported,
            power: Reading::Unsupported,
            timing: Reading::Unsupported,
            heap: Reading::Unsupported,
            graphics: Reading::Unsupported,
            sensors: Reading::Value(SensorCapabilities::default()),
        }
    }

    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Reading::Value(identity.into());
        self
    }

    #[must_use]
    pub fn with_battery(mut self, level: f64, charging: bool) -> Self {
        self.power = Reading::Value(PowerStatus {
            level,
            charging,
            charging_time_secs: None,
            discharging_time_secs: None,
        });
        self
    }

    #[must_use]
    pub fn without_graphics(mut self) -> Self {
        self.graphics = Reading::Unsupported;
        self
    }

    /// Wrap this platform into a capability container.
    pub fn into_capabilities(self) -> Capabilities {
        Capabilities::from_platform(Arc::new(self))
    }
}

impl MetadataSource for FakePlatform {
    fn read_metadata(&self) -> CapabilityResult<DeviceMetadata> {
        self.metadata.read("device metadata")
    }
}

impl IdentitySource for FakePlatform {
    fn identity_string(&self) -> CapabilityResult<String> {
        self.identity.read("client identity")
    }
}

#[async_trait]
impl NetworkSource for FakePlatform {
    async fn connection(&self) -> CapabilityResult<ConnectionInfo> {
        self.connection.read("connection info")
    }
}

#[async_trait]
impl StorageSource for FakePlatform {
    fn availability(&self) -> CapabilityResult<StorageAvailability> {
        self.storage.read("storage")
    }

    async fn estimate(&self) -> CapabilityResult<StorageEstimate> {
        self.estimate.read("storage estimate")
    }
}

#[async_trait]
impl PowerSource for FakePlatform {
    async fn status(&self) -> CapabilityResult<PowerStatus> {
        self.power.read("power status")
    }
}

impl TimingSource for FakePlatform {
    fn navigation_timing(&self) -> CapabilityResult<NavigationTiming> {
        self.timing.read("navigation timing")
    }

    fn heap_usage(&self) -> CapabilityResult<HeapUsage> {
        self.heap.read("heap usage")
    }
}

impl GraphicsSource for FakePlatform {
    fn create_context(&self) -> CapabilityResult<Box<dyn RenderContext>> {
        let renderer = self.graphics.read("rendering context")?;
        Ok(Box::new(renderer))
    }
}

impl SensorSource for FakePlatform {
    fn sensors(&self) -> CapabilityResult<SensorCapabilities> {
        self.sensors.read("sensors")
    }
}
