//! Capture Orchestrator: runs every probe in a fixed order.

use super::probe::{Probe, isolate};
use super::probes::standard_probes;
use crate::domain::TelemetrySnapshot;
use crate::ports::Capabilities;
use std::time::Instant;
use tracing::info;

/// Runs the ordered probe list and assembles one [`TelemetrySnapshot`].
///
/// Probes run one after another; each suspension is awaited before the next
/// probe starts, so the error log order is reproducible. Total latency is
/// the sum of the probe latencies.
pub struct CaptureOrchestrator {
    probes: Vec<Box<dyn Probe>>,
}

impl CaptureOrchestrator {
    /// Orchestrator over the standard probe set for the given capabilities.
    pub fn new(capabilities: &Capabilities) -> Self {
        Self::with_probes(standard_probes(capabilities))
    }

    /// Orchestrator over an explicit probe list, run in the given order.
    pub fn with_probes(probes: Vec<Box<dyn Probe>>) -> Self {
        Self { probes }
    }

    /// Module names of the probes, in run order.
    pub fn modules(&self) -> Vec<&'static str> {
        self.probes.iter().map(|p| p.module()).collect()
    }

    /// Capture a snapshot. Never fails as a whole.
    pub async fn run(&self) -> TelemetrySnapshot {
        let started = Instant::now();
        let mut snapshot = TelemetrySnapshot::new();

        for probe in &self.probes {
            snapshot = isolate(snapshot, probe.as_ref()).await;
        }

        info!(
            probes = self.probes.len(),
            errors = snapshot.errors.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Telemetry capture complete"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Detected, OsVersion, Subsystem};
    use crate::testing::{FakePlatform, Reading};

    #[test]
    fn test_probe_order_is_fixed() {
        let orchestrator = CaptureOrchestrator::new(&FakePlatform::healthy().into_capabilities());
        assert_eq!(
            orchestrator.modules(),
            Subsystem::ALL.map(Subsystem::module).to_vec()
        );
    }

    #[tokio::test]
    async fn test_healthy_platform_captures_every_subsystem() {
        let orchestrator = CaptureOrchestrator::new(&FakePlatform::healthy().into_capabilities());
        let snapshot = orchestrator.run().await;

        assert!(snapshot.errors.is_empty(), "{:?}", snapshot.errors);
        assert!(snapshot.metadata.timestamp.is_some());
        assert_eq!(
            snapshot.identity.os_version,
            Some(Detected::Known(OsVersion::new(17, 1, 0)))
        );
        assert!(snapshot.network.effective_type.is_some());
        assert_eq!(snapshot.storage.persistent, Some(true));
        assert!(snapshot.storage.estimate.is_some_and(|e| e.is_known()));
        assert_eq!(snapshot.battery.charging, Some(true));
        assert!(snapshot.performance.load_time.is_some());
        assert_eq!(snapshot.graphics.webgl, Some(true));
        assert_eq!(snapshot.sensors.max_touch_points, Some(5));
    }

    #[tokio::test]
    async fn test_every_probe_failing_keeps_shape_and_logs_in_order() {
        let platform = FakePlatform {
            metadata: Reading::Failed("a".into()),
            identity: Reading::Failed("b".into()),
            connection: Reading::Failed("c".into()),
            storage: Reading::Failed("d".into()),
            power: Reading::Panics("e".into()),
            timing: Reading::Failed("f".into()),
            graphics: Reading::Failed("g".into()),
            sensors: Reading::Panics("h".into()),
            ..FakePlatform::healthy()
        };
        let snapshot = CaptureOrchestrator::new(&platform.into_capabilities())
            .run()
            .await;

        let modules: Vec<_> = snapshot.errors.iter().map(|e| e.module.as_str()).collect();
        assert_eq!(
            modules,
            [
                "Metadata",
                "Identity",
                "Network",
                "Storage",
                "Battery",
                "Performance",
                "Graphics",
                "Sensors"
            ]
        );

        let json = serde_json::to_value(&snapshot).unwrap();
        for subsystem in Subsystem::ALL {
            assert!(json[subsystem.key()].is_object());
        }
    }

    #[tokio::test]
    async fn test_one_failing_probe_leaves_others_untouched() {
        let baseline = CaptureOrchestrator::new(&FakePlatform::healthy().into_capabilities())
            .run()
            .await;

        let platform = FakePlatform {
            connection: Reading::Failed("interface vanished".into()),
            ..FakePlatform::healthy()
        };
        let snapshot = CaptureOrchestrator::new(&platform.into_capabilities())
            .run()
            .await;

        assert_eq!(snapshot.errors.len(), 1);
        assert_eq!(snapshot.errors[0].module, "Network");
        assert_eq!(snapshot.identity, baseline.identity);
        assert_eq!(snapshot.storage, baseline.storage);
        assert_eq!(snapshot.battery, baseline.battery);
        assert_eq!(snapshot.graphics, baseline.graphics);
        assert_eq!(snapshot.sensors, baseline.sensors);
    }
}
