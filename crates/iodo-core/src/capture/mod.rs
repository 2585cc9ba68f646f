//! Telemetry capture: probes and the orchestrator that runs them.
//!
//! Every probe runs inside [`isolate`], the one combinator that turns a
//! probe failure into a Capture Error and moves on to the next probe.

mod orchestrator;
mod probe;
pub mod probes;

pub use orchestrator::CaptureOrchestrator;
pub use probe::{Probe, ProbeError, isolate};
pub(crate) use probe::panic_message;
