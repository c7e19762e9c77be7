#![forbid(unsafe_code)]

use crate::catalog::GameCatalog;
use crate::domain::{GameCandidate, ProcessEntry};
use config::Config;
use itertools::Itertools;
use std::collections::HashSet;

/// Turns a process snapshot into game candidates.
///
/// A process qualifies when its executable lies under a library root, its
/// file name is not an excluded launcher, and its resident memory is at least
/// the threshold. The threshold is a fixed global filter: lightweight games
/// below it are missed, and heavy non-game tools installed inside a game
/// folder are counted.
#[derive(Debug, Clone)]
pub struct GameMatcher {
    min_memory_bytes: u64,
    excluded_exes: HashSet<String>,
}

impl GameMatcher {
    pub fn new(config: &Config) -> Self {
        Self {
            min_memory_bytes: config.monitor.min_memory_bytes,
            excluded_exes: config
                .monitor
                .excluded_exes
                .iter()
                .map(|name| name.to_lowercase())
                .collect(),
        }
    }

    /// A matcher with no launcher exclusions.
    pub fn with_threshold(min_memory_bytes: u64) -> Self {
        Self {
            min_memory_bytes,
            excluded_exes: HashSet::new(),
        }
    }

    pub fn min_memory_bytes(&self) -> u64 {
        self.min_memory_bytes
    }

    /// Candidates ordered by game name, then pid.
    pub fn candidates(&self, snapshot: &[ProcessEntry], catalog: &GameCatalog) -> Vec<GameCandidate> {
        snapshot
            .iter()
            .filter(|entry| entry.resident_bytes >= self.min_memory_bytes)
            .filter(|entry| !self.is_excluded(entry))
            .filter_map(|entry| {
                let game_name = catalog.resolve(&entry.exe_path)?;
                Some(GameCandidate {
                    pid: entry.pid,
                    game_name,
                    resident_bytes: entry.resident_bytes,
                    exe_path: entry.exe_path.clone(),
                })
            })
            .sorted_by(|a, b| (&a.game_name, a.pid).cmp(&(&b.game_name, b.pid)))
            .collect()
    }

    fn is_excluded(&self, entry: &ProcessEntry) -> bool {
        entry
            .exe_name()
            .is_some_and(|name| self.excluded_exes.contains(&name))
    }
}
