use crate::capture::probe::{Probe, ProbeError};
use crate::domain::{BatteryRecord, Subsystem, TelemetrySnapshot};
use crate::ports::PowerSource;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Recorded in `battery.error` when there is no power-status capability.
pub const POWER_UNSUPPORTED: &str = "Power status not supported";
/// Recorded in `battery.error` when the power-status query rejects.
pub const POWER_PERMISSION_DENIED: &str = "Power status permission denied";

/// Awaits the power-status query.
pub struct PowerProbe {
    source: Arc<dyn PowerSource>,
}

impl PowerProbe {
    pub fn new(source: Arc<dyn PowerSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Probe for PowerProbe {
    fn subsystem(&self) -> Subsystem {
        Subsystem::Battery
    }

    async fn capture(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), ProbeError> {
        match self.source.status().await {
            Ok(status) => {
                if !(0.0..=1.0).contains(&status.level) {
                    return Err(ProbeError::InvalidReading {
                        field: "battery.level",
                        reason: format!("{} is outside 0..=1", status.level),
                    });
                }
                snapshot.battery = BatteryRecord {
                    level: Some(status.level),
                    charging: Some(status.charging),
                    charging_time: status.charging_time_secs,
                    discharging_time: status.discharging_time_secs,
                    error: None,
                };
            }
            Err(err) if err.is_unsupported() => {
                snapshot.battery.error = Some(POWER_UNSUPPORTED.to_string());
            }
            Err(err) => {
                debug!(error = %err, "Power status query rejected");
                snapshot.battery.error = Some(POWER_PERMISSION_DENIED.to_string());
            }
        }
        Ok(())
    }
}
