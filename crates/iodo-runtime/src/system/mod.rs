//! Capability providers for the running host.
//!
//! Each submodule reads one subsystem. The sysfs/procfs readers take their
//! filesystem root as a parameter so they can be pointed at a temporary
//! directory tree in tests.

mod graphics;
mod identity;
mod metadata;
mod network;
mod power;
mod sensors;
mod storage;
mod timing;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use iodo_core::ports::{
    Capabilities, CapabilityError, CapabilityResult, ConnectionInfo, DeviceMetadata,
    GraphicsSource, IdentitySource, MetadataSource, NavigationTiming, NetworkSource, PowerSource,
    PowerStatus, RenderContext, SensorCapabilities, SensorSource, StorageAvailability,
    StorageSource, TimingSource,
};
use iodo_core::{HeapUsage, StorageEstimate};
use tracing::debug;

/// Capability provider backed by the local machine.
///
/// # Example
///
/// ```ignore
/// use iodo_runtime::HostPlatform;
///
/// let capabilities = HostPlatform::new().capabilities();
/// ```
#[derive(Debug, Clone)]
pub struct HostPlatform {
    sysfs_root: PathBuf,
    procfs_root: PathBuf,
    dev_root: PathBuf,
    identity_override: Option<String>,
    ready_at: SystemTime,
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HostPlatform {
    pub fn new() -> Self {
        Self {
            sysfs_root: PathBuf::from("/sys"),
            procfs_root: PathBuf::from("/proc"),
            dev_root: PathBuf::from("/dev"),
            identity_override: None,
            ready_at: SystemTime::now(),
        }
    }

    /// Report this identity string instead of the composed host one.
    #[must_use]
    pub fn with_identity(mut self, identity: Option<String>) -> Self {
        self.identity_override = identity;
        self
    }

    /// Read sysfs, procfs and device nodes below the given roots.
    #[must_use]
    pub fn with_roots(
        mut self,
        sysfs: impl Into<PathBuf>,
        procfs: impl Into<PathBuf>,
        dev: impl Into<PathBuf>,
    ) -> Self {
        self.sysfs_root = sysfs.into();
        self.procfs_root = procfs.into();
        self.dev_root = dev.into();
        self
    }

    /// Capability container for this host.
    pub fn capabilities(self) -> Capabilities {
        Capabilities::from_platform(Arc::new(self))
    }
}

/// Map an I/O failure on a capability source into a capability error.
pub(crate) fn io_error(capability: &'static str, err: &io::Error) -> CapabilityError {
    match err.kind() {
        io::ErrorKind::NotFound => CapabilityError::unsupported(capability),
        io::ErrorKind::PermissionDenied => CapabilityError::PermissionDenied { capability },
        _ => CapabilityError::query(capability, err.to_string()),
    }
}

/// Run a blocking read off the async executor.
async fn blocking<T, F>(capability: &'static str, read: F) -> CapabilityResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> CapabilityResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(read)
        .await
        .map_err(|e| CapabilityError::query(capability, e.to_string()))?
}

impl MetadataSource for HostPlatform {
    fn read_metadata(&self) -> CapabilityResult<DeviceMetadata> {
        Ok(metadata::read_metadata())
    }
}

impl IdentitySource for HostPlatform {
    fn identity_string(&self) -> CapabilityResult<String> {
        Ok(self
            .identity_override
            .clone()
            .unwrap_or_else(identity::host_identity))
    }
}

#[async_trait]
impl NetworkSource for HostPlatform {
    async fn connection(&self) -> CapabilityResult<ConnectionInfo> {
        let root = self.sysfs_root.clone();
        blocking("connection info", move || network::read_connection(&root)).await
    }
}

#[async_trait]
impl StorageSource for HostPlatform {
    fn availability(&self) -> CapabilityResult<StorageAvailability> {
        Ok(storage::availability())
    }

    async fn estimate(&self) -> CapabilityResult<StorageEstimate> {
        blocking("storage estimate", storage::estimate).await
    }
}

#[async_trait]
impl PowerSource for HostPlatform {
    async fn status(&self) -> CapabilityResult<PowerStatus> {
        let root = self.sysfs_root.clone();
        blocking("power status", move || power::read_battery(&root)).await
    }
}

impl TimingSource for HostPlatform {
    fn navigation_timing(&self) -> CapabilityResult<NavigationTiming> {
        timing::navigation_timing(self.ready_at)
    }

    fn heap_usage(&self) -> CapabilityResult<HeapUsage> {
        timing::heap_usage()
    }
}

impl GraphicsSource for HostPlatform {
    fn create_context(&self) -> CapabilityResult<Box<dyn RenderContext>> {
        let context = graphics::open_context(&self.sysfs_root, &self.dev_root)?;
        debug!(node = ?context.node(), "Opened rendering context");
        Ok(Box::new(context))
    }
}

impl SensorSource for HostPlatform {
    fn sensors(&self) -> CapabilityResult<SensorCapabilities> {
        Ok(sensors::read_sensors(&self.sysfs_root, &self.procfs_root))
    }
}
