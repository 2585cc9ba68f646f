//! HTTP backend abstraction for the analysis endpoint.
//!
//! The client is generic over this trait so tests can swap in a canned
//! backend. The production backend makes exactly one attempt per call.

use crate::config::RemoteClientConfig;
use crate::error::{RemoteError, RemoteResult};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can POST JSON and decode a JSON reply.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn post_json<B, T>(&self, url: &Url, body: &B) -> RemoteResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(config: &RemoteClientConfig) -> RemoteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json<B, T>(&self, url: &Url, body: &B) -> RemoteResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let response = self.client.post(url.as_str()).json(body).send().await?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "Analysis endpoint responded");
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
