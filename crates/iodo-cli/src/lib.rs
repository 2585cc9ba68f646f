//! Command-line front end for the iodo diagnostic pipeline.
//!
//! Parses flags, composes the host platform with the remote (or offline)
//! analysis port, runs one diagnosis and renders the report.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

// Binary-only dependencies used by main.rs
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod error;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, bootstrap};
pub use error::CliError;
pub use parser::{Cli, OutputFormat};

/// Run one diagnosis and render it in the requested format.
pub async fn run(cli: Cli) -> Result<String, CliError> {
    let format = cli.format;
    let service = bootstrap(&CliConfig::from(cli))?;
    let report = service.run().await?;

    match format {
        OutputFormat::Text => Ok(presentation::render_text(&report)),
        OutputFormat::Json => presentation::render_json(&report),
    }
}
