//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - One capability trait per telemetry subsystem, so tests can simulate the
//!   presence or absence of each capability independently
//! - No HTTP, filesystem or OS types in any signature
//! - Async only where the platform query can suspend

pub mod analysis;
pub mod capabilities;

pub use analysis::{AnalysisError, AnalysisPort, NoRemoteAnalysis};
pub use capabilities::{
    Capabilities, CapabilityError, CapabilityResult, ConnectionInfo, DeviceMetadata,
    GraphicsSource, IdentitySource, MetadataSource, NavigationTiming, NetworkSource, PowerSource,
    PowerStatus, RenderContext, RendererInfo, SensorCapabilities, SensorSource,
    StorageAvailability, StorageSource, TimingSource,
};
