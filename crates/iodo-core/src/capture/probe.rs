//! The probe contract and its single isolation combinator.

use crate::domain::{CaptureError, Subsystem, TelemetrySnapshot};
use crate::ports::CapabilityError;
use async_trait::async_trait;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors a probe can raise. Each one becomes a Capture Error.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A capability read failed in a way the probe cannot absorb.
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// The platform returned a value that makes no sense.
    #[error("Invalid {field}: {reason}")]
    InvalidReading { field: &'static str, reason: String },
}

/// A single-subsystem capture routine.
///
/// Probes write straight into their own record of the snapshot, so any
/// fields written before a failure remain visible next to the error.
#[async_trait]
pub trait Probe: Send + Sync {
    fn subsystem(&self) -> Subsystem;

    /// Module name for Capture Errors raised by this probe.
    fn module(&self) -> &'static str {
        self.subsystem().module()
    }

    async fn capture(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), ProbeError>;
}

/// Run one probe inside its own failure boundary and hand the snapshot back.
///
/// Returned errors and panics are both converted into a Capture Error
/// appended to the snapshot; nothing escapes to the caller.
pub async fn isolate(mut snapshot: TelemetrySnapshot, probe: &dyn Probe) -> TelemetrySnapshot {
    let module = probe.module();
    debug!(module, "Running probe");

    let outcome = AssertUnwindSafe(probe.capture(&mut snapshot))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            warn!(module, error = %err, "Probe failed");
            snapshot.record_error(CaptureError::from_error(module, &err));
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(module, %message, "Probe panicked");
            snapshot.record_error(CaptureError::new(module, message));
        }
    }

    snapshot
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
