#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Only log closed sessions.
    #[default]
    Log,
    /// Append to a SQLite database.
    Sqlite,
    /// Append one JSON object per line.
    #[serde(rename = "jsonl")]
    JsonLines,
}
