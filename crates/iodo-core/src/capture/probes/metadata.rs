use crate::capture::probe::{Probe, ProbeError};
use crate::domain::{MetadataRecord, Subsystem, TelemetrySnapshot};
use crate::ports::MetadataSource;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Captures static platform identity. Unsupported fields become `"unknown"`.
pub struct MetadataProbe {
    source: Arc<dyn MetadataSource>,
}

impl MetadataProbe {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Probe for MetadataProbe {
    fn subsystem(&self) -> Subsystem {
        Subsystem::Metadata
    }

    async fn capture(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), ProbeError> {
        let metadata = self.source.read_metadata()?;
        snapshot.metadata = MetadataRecord {
            timestamp: Some(Utc::now()),
            platform: Some(metadata.platform.into()),
            vendor: Some(metadata.vendor.into()),
            language: Some(metadata.language.into()),
            device_memory: Some(metadata.device_memory_gb.into()),
            hardware_concurrency: Some(metadata.hardware_concurrency.into()),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Detected;
    use crate::ports::DeviceMetadata;
    use crate::testing::{FakePlatform, Reading};

    #[tokio::test]
    async fn test_missing_fields_are_recorded_as_unknown() {
        let platform = FakePlatform {
            metadata: Reading::Value(DeviceMetadata {
                platform: Some("iPhone".to_string()),
                ..DeviceMetadata::default()
            }),
            ..FakePlatform::healthy()
        };
        let mut snapshot = TelemetrySnapshot::new();
        MetadataProbe::new(Arc::new(platform))
            .capture(&mut snapshot)
            .await
            .unwrap();

        let record = &snapshot.metadata;
        assert_eq!(record.platform, Some(Detected::Known("iPhone".to_string())));
        assert_eq!(record.vendor, Some(Detected::Unknown));
        assert_eq!(record.device_memory, Some(Detected::Unknown));
        assert_eq!(record.hardware_concurrency, Some(Detected::Unknown));

        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["language"], "unknown");
    }
}
