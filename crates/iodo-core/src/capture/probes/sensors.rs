use crate::capture::probe::{Probe, ProbeError};
use crate::domain::{SensorRecord, Subsystem, TelemetrySnapshot};
use crate::ports::SensorSource;
use async_trait::async_trait;
use std::sync::Arc;

/// Records motion-sensor classes and touch support.
pub struct SensorProbe {
    source: Arc<dyn SensorSource>,
}

impl SensorProbe {
    pub fn new(source: Arc<dyn SensorSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Probe for SensorProbe {
    fn subsystem(&self) -> Subsystem {
        Subsystem::Sensors
    }

    async fn capture(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), ProbeError> {
        let sensors = self.source.sensors()?;
        snapshot.sensors = SensorRecord {
            accelerometer: Some(sensors.accelerometer),
            gyroscope: Some(sensors.gyroscope),
            orientation: Some(sensors.orientation),
            touch: Some(sensors.touch),
            max_touch_points: Some(sensors.max_touch_points.unwrap_or(0)),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SensorCapabilities;
    use crate::testing::{FakePlatform, Reading};

    #[tokio::test]
    async fn test_touch_points_default_to_zero() {
        let platform = FakePlatform {
            sensors: Reading::Value(SensorCapabilities::default()),
            ..FakePlatform::healthy()
        };
        let mut snapshot = TelemetrySnapshot::new();
        SensorProbe::new(Arc::new(platform))
            .capture(&mut snapshot)
            .await
            .unwrap();

        assert_eq!(snapshot.sensors.max_touch_points, Some(0));
        assert_eq!(snapshot.sensors.touch, Some(false));
    }
}
