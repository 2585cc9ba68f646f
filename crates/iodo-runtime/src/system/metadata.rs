//! Static device metadata from `sysinfo` and the process environment.

use iodo_core::ports::DeviceMetadata;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn read_metadata() -> DeviceMetadata {
    let sys = System::new_with_specifics(
        RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::nothing().with_ram()),
    );

    let vendor = sys
        .cpus()
        .first()
        .map(|cpu| cpu.vendor_id().trim().to_string())
        .filter(|v| !v.is_empty());
    let total_memory = sys.total_memory();
    #[allow(clippy::cast_precision_loss)]
    let memory_gb = total_memory as f64 / BYTES_PER_GIB;

    DeviceMetadata {
        platform: System::name(),
        vendor,
        language: std::env::var("LANG").ok().and_then(|lang| language_tag(&lang)),
        device_memory_gb: (total_memory > 0).then_some(memory_gb),
        hardware_concurrency: u32::try_from(sys.cpus().len()).ok().filter(|n| *n > 0),
    }
}

/// Turn a POSIX locale (`en_US.UTF-8`) into a language tag (`en-US`).
pub fn language_tag(locale: &str) -> Option<String> {
    let base = locale.split(['.', '@']).next().unwrap_or_default();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tag() {
        assert_eq!(language_tag("en_US.UTF-8").as_deref(), Some("en-US"));
        assert_eq!(language_tag("de_DE@euro").as_deref(), Some("de-DE"));
        assert_eq!(language_tag("fr").as_deref(), Some("fr"));
        assert_eq!(language_tag("C.UTF-8"), None);
        assert_eq!(language_tag("POSIX"), None);
        assert_eq!(language_tag(""), None);
    }

    #[test]
    fn test_read_metadata_reports_cpus() {
        let metadata = read_metadata();
        assert!(metadata.hardware_concurrency.is_some_and(|n| n >= 1));
    }
}
