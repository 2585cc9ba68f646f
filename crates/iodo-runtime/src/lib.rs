//! Host capability adapters for iodo.
//!
//! [`HostPlatform`] implements every capability port from `iodo-core` for the
//! machine the process runs on, reading Linux sysfs/procfs and querying
//! `sysinfo`. Capabilities the host does not expose are reported as
//! unsupported rather than as failures.

#![deny(unused_crate_dependencies)]

pub mod system;

pub use system::HostPlatform;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
