use crate::capture::probe::{Probe, ProbeError};
use crate::domain::{Detected, Subsystem, TelemetrySnapshot};
use crate::ports::TimingSource;
use async_trait::async_trait;
use std::sync::Arc;

/// Derives load metrics from the timing markers.
pub struct PerformanceProbe {
    source: Arc<dyn TimingSource>,
}

impl PerformanceProbe {
    pub fn new(source: Arc<dyn TimingSource>) -> Self {
        Self { source }
    }
}

/// Signed `end - start` in milliseconds.
fn elapsed_ms(end: u64, start: u64) -> i64 {
    if end >= start {
        i64::try_from(end - start).unwrap_or(i64::MAX)
    } else {
        i64::try_from(start - end).map_or(i64::MIN, |d| -d)
    }
}

#[async_trait]
impl Probe for PerformanceProbe {
    fn subsystem(&self) -> Subsystem {
        Subsystem::Performance
    }

    async fn capture(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), ProbeError> {
        let timing = match self.source.navigation_timing() {
            Ok(timing) => timing,
            Err(err) if err.is_unsupported() => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        let record = &mut snapshot.performance;
        record.navigation_start = Some(timing.navigation_start);
        record.load_event_end = Some(timing.load_event_end);
        record.dom_complete = Some(timing.dom_complete);
        record.load_time = Some(elapsed_ms(timing.load_event_end, timing.navigation_start));
        record.dom_ready_time = Some(elapsed_ms(timing.dom_complete, timing.dom_loading));

        record.memory = Some(match self.source.heap_usage() {
            Ok(heap) => Detected::Known(heap),
            Err(err) if err.is_unsupported() => Detected::Unknown,
            Err(err) => return Err(err.into()),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::NavigationTiming;
    use crate::testing::{FakePlatform, Reading};

    #[test]
    fn test_elapsed_ms_is_signed() {
        assert_eq!(elapsed_ms(1_500, 1_000), 500);
        assert_eq!(elapsed_ms(0, 1_000), -1_000);
        assert_eq!(elapsed_ms(u64::MAX, 0), i64::MAX);
    }

    #[tokio::test]
    async fn test_metrics_are_derived_from_markers() {
        let platform = FakePlatform {
            timing: Reading::Value(NavigationTiming {
                navigation_start: 10_000,
                dom_loading: 10_200,
                dom_complete: 12_000,
                load_event_end: 16_500,
            }),
            heap: Reading::Unsupported,
            ..FakePlatform::healthy()
        };
        let mut snapshot = TelemetrySnapshot::new();
        PerformanceProbe::new(Arc::new(platform))
            .capture(&mut snapshot)
            .await
            .unwrap();

        assert_eq!(snapshot.performance.load_time, Some(6_500));
        assert_eq!(snapshot.performance.dom_ready_time, Some(1_800));
        assert_eq!(snapshot.performance.memory, Some(Detected::Unknown));
    }

    #[tokio::test]
    async fn test_heap_failure_keeps_timing_fields() {
        let platform = FakePlatform {
            heap: Reading::Failed("procfs unreadable".into()),
            ..FakePlatform::healthy()
        };
        let mut snapshot = TelemetrySnapshot::new();
        let result = PerformanceProbe::new(Arc::new(platform))
            .capture(&mut snapshot)
            .await;

        assert!(result.is_err());
        assert!(snapshot.performance.load_time.is_some());
        assert!(snapshot.performance.memory.is_none());
    }
}
