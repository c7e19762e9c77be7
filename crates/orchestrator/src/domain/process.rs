#![forbid(unsafe_code)]

use std::path::PathBuf;

/// One live process as observed by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub exe_path: PathBuf,
    pub resident_bytes: u64,
}

impl ProcessEntry {
    pub fn new(pid: u32, exe_path: impl Into<PathBuf>, resident_bytes: u64) -> Self {
        Self {
            pid,
            exe_path: exe_path.into(),
            resident_bytes,
        }
    }

    /// Lowercased executable file name, if the path has one.
    pub fn exe_name(&self) -> Option<String> {
        self.exe_path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
    }
}

/// Unordered set of processes captured in one poll.
pub type ProcessSnapshot = Vec<ProcessEntry>;
