#![forbid(unsafe_code)]

use crate::catalog::GameCatalog;
use crate::clock::Clock;
use crate::domain::{GameCandidate, SessionRecord, duration_minutes};
use crate::error::Error;
use crate::matcher::GameMatcher;
use crate::observation::Scanner;
use crate::sink::SessionSink;
use crate::tracker::{SessionTracker, Transitions};
use config::Config;
use humansize::{BINARY, format_size};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub struct Services {
    pub scanner: Box<dyn Scanner>,
    pub catalog: GameCatalog,
    pub sink: Box<dyn SessionSink>,
    pub clock: Box<dyn Clock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Log the currently open sessions.
    DumpSessions,
    /// Re-read the library roots.
    RefreshCatalog,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick_id: u64,
    /// The scan failed and tracker state was left untouched.
    pub skipped: bool,
    pub processes: usize,
    pub candidates: usize,
    pub transitions: Transitions,
    /// Closed sessions the sink accepted.
    pub recorded: usize,
    /// Closed sessions lost to sink failures or timeouts.
    pub dropped: usize,
}

/// Drives scan, match, track and record on a fixed interval.
///
/// The engine is the only owner of the tracker; every transition happens
/// inside [`GameLogEngine::tick`].
pub struct GameLogEngine {
    services: Services,
    matcher: GameMatcher,
    tracker: SessionTracker,
    poll_interval: Duration,
    sink_timeout: Duration,
    tick_id: u64,
    /// Set after the "no roots" warning so it is logged once per outage.
    catalog_degraded: bool,
}

impl GameLogEngine {
    /// Build an engine. Fails only on invalid configuration.
    pub fn new(config: &Config, services: Services) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            services,
            matcher: GameMatcher::new(config),
            tracker: SessionTracker::new(),
            poll_interval: config.monitor.poll_interval,
            sink_timeout: config.sink.timeout,
            tick_id: 0,
            catalog_degraded: false,
        })
    }

    /// Execute a single scan/match/track/record cycle without sleeping.
    ///
    /// Never fails: scan, catalog and sink errors are logged and the engine
    /// stays usable for the next tick.
    pub async fn tick(&mut self) -> TickReport {
        self.tick_id = self.tick_id.saturating_add(1);
        let now = self.services.clock.wall();
        let mut report = TickReport {
            tick_id: self.tick_id,
            ..Default::default()
        };

        if self.services.catalog.is_empty() {
            self.refresh_catalog();
        }

        let snapshot = match self.services.scanner.capture() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, tick = self.tick_id, "process scan failed, skipping tick");
                report.skipped = true;
                return report;
            }
        };

        let candidates = self.matcher.candidates(&snapshot, &self.services.catalog);
        report.processes = snapshot.len();
        report.candidates = candidates.len();

        let transitions = self.tracker.observe(&candidates, now);
        for session in &transitions.opened {
            let resident = resident_of(&candidates, session.pid);
            info!(
                game = %session.game_name,
                pid = session.pid,
                resident = %format_size(resident, BINARY),
                "session opened"
            );
        }

        for record in &transitions.closed {
            if self.deliver(record).await {
                report.recorded += 1;
            } else {
                report.dropped += 1;
            }
        }

        debug!(
            tick = self.tick_id,
            processes = report.processes,
            candidates = report.candidates,
            open = self.tracker.len(),
            "tick complete"
        );
        report.transitions = transitions;
        report
    }

    /// Run ticks until the cancellation token is triggered.
    pub async fn run_until(
        &mut self,
        cancel: CancellationToken,
        mut control_rx: mpsc::UnboundedReceiver<ControlEvent>,
    ) -> Result<(), Error> {
        info!(
            interval = ?self.poll_interval,
            threshold = %format_size(self.matcher.min_memory_bytes(), BINARY),
            "monitor started"
        );
        while !cancel.is_cancelled() {
            let tick_start = self.services.clock.now();
            self.tick().await;

            // Control events are served while waiting; they never pull the
            // next tick forward.
            loop {
                let elapsed = self.services.clock.now().saturating_duration_since(tick_start);
                let remaining = self.poll_interval.saturating_sub(elapsed);
                if remaining.is_zero() {
                    break;
                }

                tokio::select! {
                    _ = cancel.cancelled() => break,
                    Some(event) = control_rx.recv() => {
                        self.handle_control(event);
                    }
                    _ = self.services.clock.sleep(remaining) => break,
                }
            }
        }
        self.shutdown();
        Ok(())
    }

    /// Read-only access to the open sessions (useful for tests).
    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    pub fn catalog(&self) -> &GameCatalog {
        &self.services.catalog
    }

    pub fn handle_control(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::DumpSessions => self.dump_sessions(),
            ControlEvent::RefreshCatalog => {
                self.catalog_degraded = false;
                self.refresh_catalog();
            }
        }
    }

    fn refresh_catalog(&mut self) {
        match self.services.catalog.refresh() {
            Ok(games) => {
                let games = games.len();
                if self.services.catalog.is_empty() {
                    if !self.catalog_degraded {
                        warn!("no readable library roots, games cannot be detected");
                        self.catalog_degraded = true;
                    }
                } else {
                    info!(roots = ?self.services.catalog.roots(), games, "catalog loaded");
                    self.catalog_degraded = false;
                }
            }
            Err(err) => {
                if !self.catalog_degraded {
                    warn!(%err, "catalog refresh failed, games cannot be detected");
                    self.catalog_degraded = true;
                }
            }
        }
    }

    /// Hand a record to the sink. Returns whether it was accepted.
    async fn deliver(&self, record: &SessionRecord) -> bool {
        let outcome = tokio::time::timeout(self.sink_timeout, self.services.sink.record(record))
            .await
            .unwrap_or_else(|_| Err(Error::SinkTimeout(self.sink_timeout)));

        match outcome {
            Ok(()) => {
                info!(
                    game = %record.game_name,
                    minutes = record.duration_minutes,
                    "session closed"
                );
                true
            }
            Err(err) => {
                error!(
                    %err,
                    game = %record.game_name,
                    minutes = record.duration_minutes,
                    "failed to record session, dropping it"
                );
                false
            }
        }
    }

    fn dump_sessions(&self) {
        let span = tracing::info_span!("session dump");
        let _enter = span.enter();
        let now = self.services.clock.wall();
        info!(open = self.tracker.len(), "open sessions");
        for session in self.tracker.open_sessions() {
            info!(
                game = %session.game_name,
                pid = session.pid,
                started_at = %session.started_at,
                minutes = duration_minutes(session.started_at, now),
                "open session"
            );
        }
    }

    fn shutdown(&mut self) {
        for session in self.tracker.abandon() {
            warn!(
                game = %session.game_name,
                started_at = %session.started_at,
                "monitor stopping, open session not recorded"
            );
        }
        info!("shutdown requested");
    }
}

fn resident_of(candidates: &[GameCandidate], pid: u32) -> u64 {
    candidates
        .iter()
        .find(|candidate| candidate.pid == pid)
        .map_or(0, |candidate| candidate.resident_bytes)
}
