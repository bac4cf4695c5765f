use std::sync::Mutex;

use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::error::ProcessResolutionError;

use super::ProcessInfo;

/// Process-name lookup backed by `sysinfo`.
pub struct SysinfoProcessInfo {
    system: Mutex<System>,
}

impl SysinfoProcessInfo {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoProcessInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessInfo for SysinfoProcessInfo {
    fn process_name(&self, pid: u32) -> Result<String, ProcessResolutionError> {
        let pid_key = Pid::from_u32(pid);
        let mut system = self
            .system
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Only refresh the one process we care about; a full scan is far too slow
        // to run on every keystroke.
        system.refresh_processes(ProcessesToUpdate::Some(&[pid_key]));

        system
            .process(pid_key)
            .map(|process| process.name().to_string_lossy().into_owned())
            .ok_or(ProcessResolutionError::NotFound(pid))
    }
}
