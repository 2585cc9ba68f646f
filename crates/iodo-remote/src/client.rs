//! Remote analysis client and its `AnalysisPort` implementation.

use async_trait::async_trait;
use iodo_core::{AnalysisError, AnalysisPort, AnalysisResult, TelemetrySnapshot};
use tracing::{debug, warn};
use url::Url;

use crate::config::{ANALYZE_PATH, RemoteClientConfig};
use crate::error::RemoteResult;
use crate::http::{HttpBackend, ReqwestBackend};

/// Remote client using the reqwest HTTP backend.
pub type DefaultRemoteClient = RemoteAnalysisClient<ReqwestBackend>;

/// Client for the `POST /api/analyze` endpoint.
///
/// Generic over the HTTP backend so tests can use a canned one; production
/// code uses [`DefaultRemoteClient`].
pub struct RemoteAnalysisClient<B: HttpBackend> {
    backend: B,
    endpoint: Url,
}

impl DefaultRemoteClient {
    /// Build a client for the configured origin.
    pub fn new(config: &RemoteClientConfig) -> RemoteResult<Self> {
        let endpoint = endpoint_url(config.origin())?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self { backend, endpoint })
    }
}

impl<B: HttpBackend> RemoteAnalysisClient<B> {
    pub fn with_backend(origin: &str, backend: B) -> RemoteResult<Self> {
        Ok(Self {
            backend,
            endpoint: endpoint_url(origin)?,
        })
    }

    /// Absolute URL of the analysis endpoint.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit a snapshot once and decode the reply.
    pub async fn submit(&self, snapshot: &TelemetrySnapshot) -> RemoteResult<AnalysisResult> {
        debug!(endpoint = %self.endpoint, "Submitting snapshot for analysis");
        self.backend.post_json(&self.endpoint, snapshot).await
    }
}

fn endpoint_url(origin: &str) -> RemoteResult<Url> {
    Ok(Url::parse(origin)?.join(ANALYZE_PATH)?)
}

#[async_trait]
impl<B: HttpBackend> AnalysisPort for RemoteAnalysisClient<B> {
    async fn analyze(&self, snapshot: &TelemetrySnapshot) -> Result<AnalysisResult, AnalysisError> {
        self.submit(snapshot).await.map_err(|err| {
            warn!(endpoint = %self.endpoint, error = %err, "Remote analysis failed");
            err.into()
        })
    }
}
