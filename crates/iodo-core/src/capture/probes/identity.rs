use crate::capture::probe::{Probe, ProbeError};
use crate::domain::{
    Subsystem, TelemetrySnapshot, classify_browser, classify_platform, parse_os_version,
};
use crate::ports::IdentitySource;
use async_trait::async_trait;
use std::sync::Arc;

/// Classifies the raw client identity string.
pub struct IdentityProbe {
    source: Arc<dyn IdentitySource>,
}

impl IdentityProbe {
    pub fn new(source: Arc<dyn IdentitySource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Probe for IdentityProbe {
    fn subsystem(&self) -> Subsystem {
        Subsystem::Identity
    }

    async fn capture(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), ProbeError> {
        let raw = self.source.identity_string()?;
        let record = &mut snapshot.identity;
        record.raw = Some(raw.clone());
        record.platform_family = Some(classify_platform(&raw));
        record.browser = Some(classify_browser(&raw));
        record.os_version = Some(parse_os_version(&raw).into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Detected, PlatformFamily};
    use crate::testing::{FakePlatform, Reading};

    async fn capture_identity(identity: &str) -> TelemetrySnapshot {
        let platform = FakePlatform {
            identity: Reading::Value(identity.to_string()),
            ..FakePlatform::healthy()
        };
        let mut snapshot = TelemetrySnapshot::new();
        IdentityProbe::new(Arc::new(platform))
            .capture(&mut snapshot)
            .await
            .unwrap();
        snapshot
    }

    #[tokio::test]
    async fn test_unrecognized_identity_has_unknown_version() {
        let snapshot = capture_identity("Linux (Debian 12); aarch64").await;
        assert_eq!(snapshot.identity.os_version, Some(Detected::Unknown));
        assert_eq!(snapshot.identity.platform_family, Some(PlatformFamily::Linux));

        let json = serde_json::to_value(&snapshot.identity).unwrap();
        assert_eq!(json["osVersion"], "unknown");
    }

    #[tokio::test]
    async fn test_ios_identity_is_parsed() {
        let snapshot =
            capture_identity("Mozilla/5.0 (iPhone; CPU iPhone OS 13_7 like Mac OS X)").await;
        let json = serde_json::to_value(&snapshot.identity).unwrap();
        assert_eq!(json["osVersion"], "13.7.0");
        assert_eq!(json["platformFamily"], "ios");
    }
}
