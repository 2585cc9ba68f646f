//! Motion sensors from IIO and touch devices from the input subsystem.

use std::fs;
use std::path::Path;

use iodo_core::ports::SensorCapabilities;

/// Scan IIO channels and input devices.
///
/// Missing directories simply mean no sensors of that class.
pub fn read_sensors(sysfs_root: &Path, procfs_root: &Path) -> SensorCapabilities {
    let channels = iio_channels(&sysfs_root.join("bus/iio/devices"));
    let has = |prefix: &str| channels.iter().any(|c| c.starts_with(prefix));

    let touch_devices = fs::read_to_string(procfs_root.join("bus/input/devices"))
        .map(|devices| count_touch_devices(&devices))
        .unwrap_or(0);

    SensorCapabilities {
        accelerometer: has("in_accel_"),
        gyroscope: has("in_anglvel_"),
        orientation: has("in_rot_") || has("in_incli_"),
        touch: touch_devices > 0,
        // The input layer does not expose contact counts; one per device is
        // the floor.
        max_touch_points: Some(touch_devices),
    }
}

fn iio_channels(devices: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(devices) else {
        return Vec::new();
    };
    entries
        .filter_map(Result::ok)
        .filter_map(|device| fs::read_dir(device.path()).ok())
        .flat_map(|files| files.filter_map(Result::ok))
        .map(|file| file.file_name().to_string_lossy().into_owned())
        .collect()
}

/// Count `N: Name=` entries in `/proc/bus/input/devices` that look like
/// touchscreens.
fn count_touch_devices(devices: &str) -> u32 {
    let count = devices
        .lines()
        .filter_map(|line| line.strip_prefix("N: Name="))
        .filter(|name| {
            let name = name.to_ascii_lowercase();
            name.contains("touchscreen") || name.contains("touch screen")
        })
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}
