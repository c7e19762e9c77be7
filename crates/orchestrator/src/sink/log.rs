#![forbid(unsafe_code)]

use super::SessionSink;
use crate::domain::SessionRecord;
use crate::error::Error;
use async_trait::async_trait;
use tracing::info;

/// Writes each record to the log and nowhere else.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl SessionSink for LogSink {
    async fn record(&self, record: &SessionRecord) -> Result<(), Error> {
        let [game, minutes, started_at, ended_at] = record.row();
        info!(%game, %minutes, %started_at, %ended_at, "session recorded");
        Ok(())
    }
}
