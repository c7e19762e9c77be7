#![forbid(unsafe_code)]

use crate::domain::{GameCandidate, Session, SessionRecord};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// State changes produced by one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transitions {
    pub opened: Vec<Session>,
    pub closed: Vec<SessionRecord>,
}

impl Transitions {
    pub fn is_empty(&self) -> bool {
        self.opened.is_empty() && self.closed.is_empty()
    }
}

/// Open sessions keyed by game name.
///
/// A game is open while at least one candidate for it is seen on every tick.
/// The first tick without one closes it. There is no grace period: a game
/// missing from a single tick is closed and reopened as a new session.
#[derive(Debug, Default)]
pub struct SessionTracker {
    open: BTreeMap<String, Session>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one tick's candidates.
    pub fn observe(&mut self, candidates: &[GameCandidate], now: DateTime<Utc>) -> Transitions {
        // lowest pid per live game
        let mut live: BTreeMap<&str, u32> = BTreeMap::new();
        for candidate in candidates {
            live.entry(candidate.game_name.as_str())
                .and_modify(|pid| *pid = (*pid).min(candidate.pid))
                .or_insert(candidate.pid);
        }

        let mut transitions = Transitions::default();

        for (&game_name, &pid) in &live {
            if !self.open.contains_key(game_name) {
                let session = Session::open(game_name, pid, now);
                self.open.insert(game_name.to_owned(), session.clone());
                transitions.opened.push(session);
            }
        }

        self.open.retain(|game_name, session| {
            if live.contains_key(game_name.as_str()) {
                return true;
            }
            transitions.closed.push(session.clone().close(now));
            false
        });

        transitions
    }

    pub fn get(&self, game_name: &str) -> Option<&Session> {
        self.open.get(game_name)
    }

    pub fn open_sessions(&self) -> impl Iterator<Item = &Session> + '_ {
        self.open.values()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Drop every open session without closing it. Used at shutdown.
    pub fn abandon(&mut self) -> Vec<Session> {
        std::mem::take(&mut self.open).into_values().collect()
    }
}
