//! Battery status from `/sys/class/power_supply`.

use std::fs;
use std::path::{Path, PathBuf};

use iodo_core::ports::{CapabilityError, CapabilityResult, PowerStatus};

use super::io_error;
use super::network::read_trimmed;

const CAPABILITY: &str = "power status";

/// Read the first supply whose `type` is `Battery`.
pub fn read_battery(sysfs_root: &Path) -> CapabilityResult<PowerStatus> {
    let supplies = sysfs_root.join("class/power_supply");
    let entries = fs::read_dir(&supplies).map_err(|e| io_error(CAPABILITY, &e))?;

    let mut batteries: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| read_trimmed(&path.join("type")).as_deref() == Some("Battery"))
        .collect();
    batteries.sort();

    let battery = batteries
        .into_iter()
        .next()
        .ok_or(CapabilityError::unsupported(CAPABILITY))?;

    let capacity = fs::read_to_string(battery.join("capacity"))
        .map_err(|e| io_error(CAPABILITY, &e))?;
    let percent: f64 = capacity.trim().parse().map_err(|_| {
        CapabilityError::query(CAPABILITY, format!("unreadable capacity '{}'", capacity.trim()))
    })?;

    let status = read_trimmed(&battery.join("status")).unwrap_or_default();
    let charging = matches!(status.as_str(), "Charging" | "Full");

    let (charging_time_secs, discharging_time_secs) = remaining_times(&battery, charging);

    Ok(PowerStatus {
        level: percent / 100.0,
        charging,
        charging_time_secs,
        discharging_time_secs,
    })
}

/// Estimate time to full / empty from energy and power readings.
fn remaining_times(battery: &Path, charging: bool) -> (Option<f64>, Option<f64>) {
    let read = |name: &str| {
        read_trimmed(&battery.join(name)).and_then(|v| v.parse::<f64>().ok())
    };
    let now = read("energy_now").or_else(|| read("charge_now"));
    let full = read("energy_full").or_else(|| read("charge_full"));
    let rate = read("power_now")
        .or_else(|| read("current_now"))
        .filter(|r| *r > 0.0);

    let (Some(now), Some(rate)) = (now, rate) else {
        return (None, None);
    };
    if charging {
        (full.map(|full| (full - now).max(0.0) / rate * 3600.0), None)
    } else {
        (None, Some(now / rate * 3600.0))
    }
}
