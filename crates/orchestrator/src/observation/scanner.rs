#![forbid(unsafe_code)]

use crate::domain::{ProcessEntry, ProcessSnapshot};
use crate::error::Error;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tracing::trace;

/// Enumerates live processes. Platform details stay behind this trait.
pub trait Scanner: Send + Sync {
    /// Capture every observable process. Processes that vanish or cannot be
    /// inspected mid-scan are left out rather than reported as errors.
    fn capture(&mut self) -> Result<ProcessSnapshot, Error>;
}

/// [`Scanner`] backed by `sysinfo`.
pub struct SysinfoScanner {
    system: System,
    refresh_kind: ProcessRefreshKind,
    own_pid: u32,
}

impl std::fmt::Debug for SysinfoScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SysinfoScanner")
            .field("own_pid", &self.own_pid)
            .finish_non_exhaustive()
    }
}

impl Default for SysinfoScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoScanner {
    pub fn new() -> Self {
        let refresh_kind = ProcessRefreshKind::nothing()
            .with_exe(UpdateKind::OnlyIfNotSet)
            .with_memory();
        Self {
            system: System::new(),
            refresh_kind,
            own_pid: std::process::id(),
        }
    }
}

impl Scanner for SysinfoScanner {
    fn capture(&mut self) -> Result<ProcessSnapshot, Error> {
        self.system
            .refresh_processes_specifics(ProcessesToUpdate::All, true, self.refresh_kind);

        let snapshot: ProcessSnapshot = self
            .system
            .processes()
            .iter()
            .filter_map(|(pid, process)| {
                let pid = pid.as_u32();
                if pid == self.own_pid {
                    return None;
                }
                // Kernel threads and processes we may not inspect have no exe.
                let exe_path = process.exe()?;
                Some(ProcessEntry::new(pid, exe_path, process.memory()))
            })
            .collect();

        trace!(processes = snapshot.len(), "captured process snapshot");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_excludes_own_process() {
        let mut scanner = SysinfoScanner::new();
        let snapshot = scanner.capture().unwrap();
        assert!(snapshot.iter().all(|entry| entry.pid != std::process::id()));
    }
}
