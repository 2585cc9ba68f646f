//! Rendering context discovery.
//!
//! On Linux the context is the first DRM render node; its PCI identity comes
//! from sysfs. macOS always has Metal.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use iodo_core::ports::{CapabilityError, CapabilityResult, RenderContext, RendererInfo};

use super::io_error;
use super::network::read_trimmed;

const CAPABILITY: &str = "rendering context";

/// Map a PCI vendor id to a vendor name.
pub fn pci_vendor_name(id: &str) -> Option<&'static str> {
    match id.trim().to_ascii_lowercase().as_str() {
        "0x10de" => Some("NVIDIA Corporation"),
        "0x1002" => Some("Advanced Micro Devices, Inc."),
        "0x8086" => Some("Intel Corporation"),
        "0x106b" => Some("Apple Inc."),
        _ => None,
    }
}

/// An open host rendering context.
#[derive(Debug, Clone)]
pub enum HostRenderContext {
    /// A DRM render node such as `/dev/dri/renderD128`.
    Drm { node: PathBuf, sysfs_device: PathBuf },
    Metal,
}

impl HostRenderContext {
    pub fn node(&self) -> Option<&Path> {
        match self {
            Self::Drm { node, .. } => Some(node),
            Self::Metal => None,
        }
    }
}

pub fn open_context(sysfs_root: &Path, dev_root: &Path) -> CapabilityResult<HostRenderContext> {
    if cfg!(target_os = "macos") {
        return Ok(HostRenderContext::Metal);
    }

    let dri = dev_root.join("dri");
    let entries = fs::read_dir(&dri).map_err(|e| io_error(CAPABILITY, &e))?;
    let mut nodes: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("renderD"))
        .collect();
    nodes.sort();

    let name = nodes
        .into_iter()
        .next()
        .ok_or(CapabilityError::unsupported(CAPABILITY))?;

    Ok(HostRenderContext::Drm {
        node: dri.join(&name),
        sysfs_device: sysfs_root.join("class/drm").join(&name).join("device"),
    })
}

impl RenderContext for HostRenderContext {
    fn renderer_info(&self) -> CapabilityResult<RendererInfo> {
        match self {
            Self::Metal => Ok(RendererInfo {
                renderer: "Apple Metal".to_string(),
                vendor: "Apple Inc.".to_string(),
            }),
            Self::Drm { sysfs_device, .. } => drm_renderer_info(sysfs_device),
        }
    }

    /// Opening the node for submission stands in for the shader check: a
    /// node that cannot be opened read-write cannot compile anything.
    fn compile_probe_shader(&self) -> CapabilityResult<bool> {
        match self {
            Self::Metal => Ok(true),
            Self::Drm { node, .. } => Ok(OpenOptions::new()
                .read(true)
                .write(true)
                .open(node)
                .is_ok()),
        }
    }
}

fn drm_renderer_info(device: &Path) -> CapabilityResult<RendererInfo> {
    const DEBUG_INFO: &str = "renderer debug info";

    let vendor_id =
        read_trimmed(&device.join("vendor")).ok_or(CapabilityError::unsupported(DEBUG_INFO))?;
    let device_id = read_trimmed(&device.join("device")).unwrap_or_else(|| "unknown".to_string());
    let driver = fs::read_link(device.join("driver"))
        .ok()
        .and_then(|link| link.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "drm".to_string());

    Ok(RendererInfo {
        renderer: format!("{driver} ({vendor_id}:{device_id})"),
        vendor: pci_vendor_name(&vendor_id).map_or(vendor_id.clone(), str::to_string),
    })
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pci_vendor_names() {
        assert_eq!(pci_vendor_name("0x10de"), Some("NVIDIA Corporation"));
        assert_eq!(pci_vendor_name("0x8086\n"), Some("Intel Corporation"));
        assert_eq!(pci_vendor_name("0x1AF4"), None);
    }

    #[test]
    fn test_no_render_node_is_unsupported() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("dri")).unwrap();
        fs::write(root.path().join("dri/card0"), "").unwrap();

        let err = open_context(root.path(), root.path()).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_render_node_with_pci_identity() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("dri")).unwrap();
        fs::write(root.path().join("dri/renderD128"), "").unwrap();
        let device = root.path().join("class/drm/renderD128/device");
        fs::create_dir_all(&device).unwrap();
        fs::write(device.join("vendor"), "0x1002\n").unwrap();
        fs::write(device.join("device"), "0x73bf\n").unwrap();

        let context = open_context(root.path(), root.path()).unwrap();
        assert_eq!(context.node(), Some(root.path().join("dri/renderD128").as_path()));

        let info = context.renderer_info().unwrap();
        assert_eq!(info.vendor, "Advanced Micro Devices, Inc.");
        assert_eq!(info.renderer, "drm (0x1002:0x73bf)");
        assert!(context.compile_probe_shader().unwrap());
    }

    #[test]
    fn test_missing_pci_identity_is_unsupported_debug_info() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("dri")).unwrap();
        fs::write(root.path().join("dri/renderD129"), "").unwrap();

        let context = open_context(root.path(), root.path()).unwrap();
        assert!(context.renderer_info().unwrap_err().is_unsupported());
    }
}
