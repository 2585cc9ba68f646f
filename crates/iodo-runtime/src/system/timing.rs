//! Load timing and heap usage for the current process.
//!
//! The host has no page load, so the markers map onto the process
//! lifecycle: process start, platform construction and the moment of the
//! timing query.

use std::time::{SystemTime, UNIX_EPOCH};

use iodo_core::HeapUsage;
use iodo_core::ports::{CapabilityError, CapabilityResult, NavigationTiming};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, get_current_pid};

fn epoch_millis(at: SystemTime) -> u64 {
    at.duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

fn current_pid(capability: &'static str) -> CapabilityResult<Pid> {
    get_current_pid().map_err(|e| CapabilityError::query(capability, e))
}

fn refreshed_process_system(pid: Pid) -> System {
    let mut sys = System::new();
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );
    sys
}

pub fn navigation_timing(ready_at: SystemTime) -> CapabilityResult<NavigationTiming> {
    const CAPABILITY: &str = "navigation timing";

    let pid = current_pid(CAPABILITY)?;
    let sys = refreshed_process_system(pid);
    let started_secs = sys
        .process(pid)
        .map(sysinfo::Process::start_time)
        .ok_or(CapabilityError::unsupported(CAPABILITY))?;

    Ok(markers(
        started_secs.saturating_mul(1000),
        epoch_millis(ready_at),
        epoch_millis(SystemTime::now()),
    ))
}

/// Order the three lifecycle instants into timing markers.
fn markers(started_ms: u64, ready_ms: u64, now_ms: u64) -> NavigationTiming {
    let ready_ms = ready_ms.max(started_ms);
    NavigationTiming {
        navigation_start: started_ms,
        dom_loading: started_ms,
        dom_complete: ready_ms,
        load_event_end: now_ms.max(ready_ms),
    }
}

/// Resident set size against virtual size of this process.
pub fn heap_usage() -> CapabilityResult<HeapUsage> {
    const CAPABILITY: &str = "heap usage";

    let pid = current_pid(CAPABILITY)?;
    let sys = refreshed_process_system(pid);
    let process = sys
        .process(pid)
        .ok_or(CapabilityError::unsupported(CAPABILITY))?;

    Ok(HeapUsage {
        used_bytes: process.memory(),
        total_bytes: process.virtual_memory(),
    })
}
