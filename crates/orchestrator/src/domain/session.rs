#![forbid(unsafe_code)]

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_MINUTE: f64 = 60.0;

/// An open session. At most one exists per game name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub game_name: String,
    /// Process that opened the session. Not updated while the session lives.
    pub pid: u32,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn open(game_name: impl Into<String>, pid: u32, started_at: DateTime<Utc>) -> Self {
        Self {
            game_name: game_name.into(),
            pid,
            started_at,
        }
    }

    /// Finalize the session at `ended_at`.
    pub fn close(self, ended_at: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            duration_minutes: duration_minutes(self.started_at, ended_at),
            game_name: self.game_name,
            started_at: self.started_at,
            ended_at,
        }
    }
}

/// A closed session, handed to the sink exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub game_name: String,
    pub duration_minutes: f64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl SessionRecord {
    /// The record as a tabular row: game, minutes, start, end.
    pub fn row(&self) -> [String; 4] {
        [
            self.game_name.clone(),
            format!("{:.2}", self.duration_minutes),
            iso8601(self.started_at),
            iso8601(self.ended_at),
        ]
    }
}

pub(crate) fn iso8601(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Whole seconds between the two instants, in minutes rounded to two
/// decimals. Never negative.
pub fn duration_minutes(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> f64 {
    let seconds = (ended_at - started_at).num_seconds().max(0);
    (seconds as f64 / SECONDS_PER_MINUTE * 100.0).round() / 100.0
}
