#![forbid(unsafe_code)]

use std::path::PathBuf;

/// A process that passed both the library match and the memory threshold in
/// the current tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCandidate {
    pub pid: u32,
    pub game_name: String,
    pub resident_bytes: u64,
    pub exe_path: PathBuf,
}
