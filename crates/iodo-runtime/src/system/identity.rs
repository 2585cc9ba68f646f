//! Composed identity string for the host.

use sysinfo::System;

/// `"<long OS version>; <arch>"`, e.g. `"Linux (Ubuntu 24.04); x86_64"`.
pub fn host_identity() -> String {
    compose(System::long_os_version().as_deref(), std::env::consts::ARCH)
}

fn compose(os: Option<&str>, arch: &str) -> String {
    format!("{}; {arch}", os.unwrap_or("Unknown OS"))
}
