//! Standard probe set, one probe per subsystem.

mod graphics;
mod identity;
mod metadata;
mod network;
mod performance;
mod power;
mod sensors;
mod storage;

pub use graphics::{GraphicsProbe, RENDER_CONTEXT_UNSUPPORTED};
pub use identity::IdentityProbe;
pub use metadata::MetadataProbe;
pub use network::{CONNECTION_UNSUPPORTED, NetworkProbe};
pub use performance::PerformanceProbe;
pub use power::{POWER_PERMISSION_DENIED, POWER_UNSUPPORTED, PowerProbe};
pub use sensors::SensorProbe;
pub use storage::{STORAGE_ESTIMATE_MODULE, StorageProbe};

use super::probe::Probe;
use crate::ports::Capabilities;

/// Probes for every subsystem, in capture order:
/// metadata, identity, network, storage, power, performance, graphics, sensors.
pub fn standard_probes(capabilities: &Capabilities) -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(MetadataProbe::new(capabilities.metadata.clone())),
        Box::new(IdentityProbe::new(capabilities.identity.clone())),
        Box::new(NetworkProbe::new(capabilities.network.clone())),
        Box::new(StorageProbe::new(capabilities.storage.clone())),
        Box::new(PowerProbe::new(capabilities.power.clone())),
        Box::new(PerformanceProbe::new(capabilities.timing.clone())),
        Box::new(GraphicsProbe::new(capabilities.graphics.clone())),
        Box::new(SensorProbe::new(capabilities.sensors.clone())),
    ]
}
