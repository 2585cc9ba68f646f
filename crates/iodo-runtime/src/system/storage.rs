//! Storage availability and quota estimate.

use std::path::{Path, PathBuf};

use iodo_core::StorageEstimate;
use iodo_core::ports::{CapabilityError, CapabilityResult, StorageAvailability};
use sysinfo::Disks;

const CAPABILITY: &str = "storage estimate";

/// Persistent storage is the per-user data directory; session storage is
/// the temp directory.
pub fn availability() -> StorageAvailability {
    StorageAvailability {
        persistent: dirs::data_dir().is_some_and(|dir| dir.is_dir()),
        session: std::env::temp_dir().is_dir(),
    }
}

/// Quota and usage of the disk that hosts the data directory.
pub fn estimate() -> CapabilityResult<StorageEstimate> {
    let target = dirs::data_dir()
        .or_else(dirs::home_dir)
        .ok_or(CapabilityError::unsupported(CAPABILITY))?;

    let disks = Disks::new_with_refreshed_list();
    let mounts: Vec<(PathBuf, u64, u64)> = disks
        .list()
        .iter()
        .map(|d| (d.mount_point().to_path_buf(), d.total_space(), d.available_space()))
        .collect();

    hosting_disk(&target, &mounts).ok_or(CapabilityError::unsupported(CAPABILITY))
}

/// Pick the mount with the longest prefix of `target`.
fn hosting_disk(target: &Path, mounts: &[(PathBuf, u64, u64)]) -> Option<StorageEstimate> {
    mounts
        .iter()
        .filter(|(mount, _, _)| target.starts_with(mount))
        .max_by_key(|(mount, _, _)| mount.components().count())
        .map(|(_, total, available)| StorageEstimate {
            quota: *total,
            usage: total.saturating_sub(*available),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_mount_prefix_wins() {
        let mounts = vec![
            (PathBuf::from("/"), 100, 40),
            (PathBuf::from("/home"), 500, 450),
            (PathBuf::from("/home/other"), 9, 9),
        ];

        let estimate = hosting_disk(Path::new("/home/ana/.local/share"), &mounts).unwrap();
        assert_eq!(estimate, StorageEstimate { quota: 500, usage: 50 });

        let estimate = hosting_disk(Path::new("/var/lib"), &mounts).unwrap();
        assert_eq!(estimate, StorageEstimate { quota: 100, usage: 60 });
    }

    #[test]
    fn test_no_matching_mount() {
        let mounts = vec![(PathBuf::from("/mnt/usb"), 10, 5)];
        assert_eq!(hosting_disk(Path::new("/home/ana"), &mounts), None);
    }

    #[test]
    fn test_session_storage_available() {
        assert!(availability().session);
    }
}
