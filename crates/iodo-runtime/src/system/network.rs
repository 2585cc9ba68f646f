//! Connection information from `/sys/class/net`.

use std::fs;
use std::path::Path;

use iodo_core::EffectiveType;
use iodo_core::ports::{CapabilityResult, ConnectionInfo};

use super::io_error;

const CAPABILITY: &str = "connection info";

/// Describe the first non-loopback interface that is up.
///
/// A host with no interface up reports `connection_type = "none"`.
pub fn read_connection(sysfs_root: &Path) -> CapabilityResult<ConnectionInfo> {
    let net = sysfs_root.join("class/net");
    let entries = fs::read_dir(&net).map_err(|e| io_error(CAPABILITY, &e))?;

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name != "lo")
        .collect();
    names.sort();

    let Some(name) = names.into_iter().find(|name| is_up(&net.join(name))) else {
        return Ok(ConnectionInfo {
            connection_type: Some("none".to_string()),
            ..ConnectionInfo::default()
        });
    };

    let iface = net.join(&name);
    let downlink_mbps = read_trimmed(&iface.join("speed"))
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|mbps| *mbps > 0.0);

    Ok(ConnectionInfo {
        downlink_mbps,
        effective_type: downlink_mbps.map(EffectiveType::from_downlink_mbps),
        rtt_ms: None,
        save_data: None,
        connection_type: Some(interface_kind(&iface).to_string()),
    })
}

fn is_up(iface: &Path) -> bool {
    read_trimmed(&iface.join("operstate")).is_some_and(|state| state == "up")
}

fn interface_kind(iface: &Path) -> &'static str {
    if iface.join("wireless").exists() || iface.join("phy80211").exists() {
        "wifi"
    } else if read_trimmed(&iface.join("type")).as_deref() == Some("1") {
        "ethernet"
    } else {
        "other"
    }
}

pub(crate) fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}
