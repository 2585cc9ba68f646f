use crate::capture::probe::{Probe, ProbeError};
use crate::domain::{Detected, GraphicsRecord, Subsystem, TelemetrySnapshot};
use crate::ports::GraphicsSource;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Recorded in `graphics.error` when no rendering context can be created.
pub const RENDER_CONTEXT_UNSUPPORTED: &str = "Rendering context not supported";

/// Creates a rendering context and runs the shader compilation check.
pub struct GraphicsProbe {
    source: Arc<dyn GraphicsSource>,
}

impl GraphicsProbe {
    pub fn new(source: Arc<dyn GraphicsSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Probe for GraphicsProbe {
    fn subsystem(&self) -> Subsystem {
        Subsystem::Graphics
    }

    async fn capture(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), ProbeError> {
        let context = match self.source.create_context() {
            Ok(context) => context,
            Err(err) if err.is_unsupported() => {
                debug!(error = %err, "No rendering context");
                snapshot.graphics = GraphicsRecord {
                    webgl: Some(false),
                    error: Some(RENDER_CONTEXT_UNSUPPORTED.to_string()),
                    ..GraphicsRecord::default()
                };
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        snapshot.graphics.webgl = Some(true);

        let (renderer, vendor) = match context.renderer_info() {
            Ok(info) => (Detected::Known(info.renderer), Detected::Known(info.vendor)),
            Err(err) if err.is_unsupported() => (Detected::Unknown, Detected::Unknown),
            Err(err) => return Err(err.into()),
        };
        snapshot.graphics.renderer = Some(renderer);
        snapshot.graphics.vendor = Some(vendor);
        snapshot.graphics.shader_compile_success = Some(context.compile_probe_shader()?);
        Ok(())
    }
}
