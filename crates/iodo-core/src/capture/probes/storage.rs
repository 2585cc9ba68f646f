use crate::capture::probe::{Probe, ProbeError};
use crate::domain::{CaptureError, Detected, Subsystem, TelemetrySnapshot};
use crate::ports::StorageSource;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Capture Error module for a failed quota estimate.
pub const STORAGE_ESTIMATE_MODULE: &str = "StorageEstimate";

/// Records storage availability and awaits the quota estimate.
///
/// The estimate is part of the snapshot's completion contract: the probe
/// does not return until it has settled.
pub struct StorageProbe {
    source: Arc<dyn StorageSource>,
}

impl StorageProbe {
    pub fn new(source: Arc<dyn StorageSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Probe for StorageProbe {
    fn subsystem(&self) -> Subsystem {
        Subsystem::Storage
    }

    async fn capture(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), ProbeError> {
        let availability = self.source.availability()?;
        let record = &mut snapshot.storage;
        record.persistent = Some(availability.persistent);
        record.session = Some(availability.session);
        record.estimate = Some(Detected::Unknown);

        match self.source.estimate().await {
            Ok(estimate) => snapshot.storage.estimate = Some(Detected::Known(estimate)),
            Err(err) if err.is_unsupported() => {}
            Err(err) => {
                warn!(error = %err, "Storage estimate failed");
                snapshot.record_error(CaptureError::from_error(STORAGE_ESTIMATE_MODULE, &err));
            }
        }
        Ok(())
    }
}
