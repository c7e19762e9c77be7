#![forbid(unsafe_code)]
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use orchestrator::domain::{ProcessEntry, ProcessSnapshot, SessionRecord};
use orchestrator::{Clock, Error, Scanner, SessionSink};
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const GIB: u64 = 1024 * 1024 * 1024;

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 20, 18, 0, 0).unwrap()
}

/// Wall clock that only moves when told to, or when the engine sleeps.
#[derive(Debug, Clone)]
pub struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

impl ManualClock {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self(Arc::new(Mutex::new(time)))
    }

    pub fn advance(&self, duration: Duration) {
        let mut time = self.0.lock().unwrap();
        *time += chrono::Duration::from_std(duration).unwrap();
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        // follows tokio's clock so paused tests see time pass
        tokio::time::Instant::now().into_std()
    }

    fn wall(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        tokio::time::sleep(duration).await;
    }
}

/// Replays queued snapshots in order. Once the queue runs dry the last
/// snapshot handed out repeats.
#[derive(Debug, Clone, Default)]
pub struct ScriptedScanner {
    queue: Arc<Mutex<VecDeque<Result<ProcessSnapshot, String>>>>,
    last: Arc<Mutex<ProcessSnapshot>>,
    captures: Arc<Mutex<usize>>,
}

impl ScriptedScanner {
    pub fn push(&self, snapshot: ProcessSnapshot) {
        self.queue.lock().unwrap().push_back(Ok(snapshot));
    }

    pub fn push_failure(&self, reason: &str) {
        self.queue.lock().unwrap().push_back(Err(reason.to_string()));
    }

    /// Number of `capture` calls so far.
    pub fn captures(&self) -> usize {
        *self.captures.lock().unwrap()
    }
}

impl Scanner for ScriptedScanner {
    fn capture(&mut self) -> Result<ProcessSnapshot, Error> {
        *self.captures.lock().unwrap() += 1;
        let next = self.queue.lock().unwrap().pop_front();
        match next {
            Some(Ok(snapshot)) => {
                *self.last.lock().unwrap() = snapshot.clone();
                Ok(snapshot)
            }
            Some(Err(reason)) => Err(Error::Scan(reason)),
            None => Ok(self.last.lock().unwrap().clone()),
        }
    }
}

pub fn game(pid: u32, game_name: &str, resident_bytes: u64) -> ProcessEntry {
    ProcessEntry::new(pid, format!("/games/{game_name}/bin/game"), resident_bytes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Error,
    Hang,
}

/// Collects records in memory; can be told to fail for specific games.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<SessionRecord>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    mode: Arc<Mutex<Option<Failure>>>,
}

impl MemorySink {
    pub fn fail_for(&self, game_name: &str, failure: Failure) {
        self.failing.lock().unwrap().insert(game_name.to_string());
        *self.mode.lock().unwrap() = Some(failure);
    }

    pub fn records(&self) -> Vec<SessionRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionSink for MemorySink {
    async fn record(&self, record: &SessionRecord) -> Result<(), Error> {
        let failing = self.failing.lock().unwrap().contains(&record.game_name);
        let mode = *self.mode.lock().unwrap();
        match (failing, mode) {
            (true, Some(Failure::Hang)) => std::future::pending().await,
            (true, _) => Err(Error::Io(std::io::Error::other("sheet unavailable"))),
            (false, _) => {
                self.records.lock().unwrap().push(record.clone());
                Ok(())
            }
        }
    }
}
