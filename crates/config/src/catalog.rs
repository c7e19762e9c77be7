#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Catalog {
    /// Library roots. Each entry is a directory or a glob pattern matching
    /// directories; installed games are the immediate subfolders.
    pub roots: Vec<String>,
}
