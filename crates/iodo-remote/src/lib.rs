//! HTTP client for the iodo remote analysis endpoint.
//!
//! [`DefaultRemoteClient`] implements `iodo_core::AnalysisPort`: it posts a
//! telemetry snapshot to `<origin>/api/analyze` once and decodes the
//! Analysis Result. Every failure surfaces as
//! `AnalysisError::RemoteUnavailable`, which sends the caller to the
//! fallback heuristics.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// RemoteAnalysisClient<B> exposes the crate-private HttpBackend bound
#![allow(private_bounds)]

mod client;
mod config;
mod error;
mod http;

pub use client::{DefaultRemoteClient, RemoteAnalysisClient};
pub use config::{ANALYZE_PATH, DEFAULT_ORIGIN, RemoteClientConfig};
pub use error::{RemoteError, RemoteResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio_test as _;
