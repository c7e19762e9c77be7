#![forbid(unsafe_code)]

use crate::Error;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;

/// Launcher and helper binaries that live next to games but are never games.
const DEFAULT_EXCLUDED_EXES: &[&str] = &[
    "steam.exe",
    "steamservice.exe",
    "steamwebhelper.exe",
    "steamerrorreporter.exe",
    "steam",
    "steamwebhelper",
];

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Monitor {
    /// Poll interval in seconds.
    #[serde_as(as = "serde_with::DurationSeconds")]
    pub poll_interval: Duration,

    /// Minimum resident memory (bytes, inclusive) for a process to count as a
    /// game rather than a launcher or helper.
    pub min_memory_bytes: u64,

    /// Executable file names that are never candidates. Case-insensitive.
    pub excluded_exes: Vec<String>,
}

impl Default for Monitor {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            min_memory_bytes: 2 * 1024 * 1024 * 1024,
            excluded_exes: DEFAULT_EXCLUDED_EXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Monitor {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.poll_interval.is_zero() {
            return Err(Error::InvalidValue {
                key: "monitor.poll_interval",
                reason: "must be at least one second".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nonzero_interval_validates(secs in 1u64..86_400) {
            let monitor = Monitor { poll_interval: Duration::from_secs(secs), ..Default::default() };
            prop_assert!(monitor.validate().is_ok());
        }
    }
}
