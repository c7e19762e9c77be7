#![forbid(unsafe_code)]

use crate::{Error, SinkKind};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::{path::PathBuf, time::Duration};

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Sink {
    pub kind: SinkKind,

    /// Destination file for the sqlite and jsonl sinks.
    pub path: Option<PathBuf>,

    /// Upper bound for a single record write, in seconds.
    #[serde_as(as = "serde_with::DurationSeconds")]
    pub timeout: Duration,
}

impl Default for Sink {
    fn default() -> Self {
        Self {
            kind: SinkKind::default(),
            path: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl Sink {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.timeout.is_zero() {
            return Err(Error::InvalidValue {
                key: "sink.timeout",
                reason: "must be at least one second".into(),
            });
        }
        if self.kind != SinkKind::Log && self.path.is_none() {
            return Err(Error::InvalidValue {
                key: "sink.path",
                reason: format!("required for the {:?} sink", self.kind),
            });
        }
        Ok(())
    }
}
