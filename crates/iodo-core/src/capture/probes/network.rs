use crate::capture::probe::{Probe, ProbeError};
use crate::domain::{NetworkRecord, Subsystem, TelemetrySnapshot};
use crate::ports::NetworkSource;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Recorded in `network.error` when there is no connection-info capability.
pub const CONNECTION_UNSUPPORTED: &str = "Connection information not supported";

/// Reads connection quality when the platform exposes it.
pub struct NetworkProbe {
    source: Arc<dyn NetworkSource>,
}

impl NetworkProbe {
    pub fn new(source: Arc<dyn NetworkSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Probe for NetworkProbe {
    fn subsystem(&self) -> Subsystem {
        Subsystem::Network
    }

    async fn capture(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), ProbeError> {
        match self.source.connection().await {
            Ok(info) => {
                snapshot.network = NetworkRecord {
                    downlink: info.downlink_mbps,
                    effective_type: info.effective_type,
                    rtt: info.rtt_ms,
                    save_data: info.save_data,
                    connection_type: Some(info.connection_type.into()),
                    error: None,
                };
            }
            Err(err) if err.is_unsupported() => {
                debug!(error = %err, "No connection information");
                snapshot.network.error = Some(CONNECTION_UNSUPPORTED.to_string());
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}
