#![forbid(unsafe_code)]

mod jsonl;
mod log;
mod sqlite;

pub use jsonl::JsonLinesSink;
pub use log::LogSink;
pub use sqlite::SqliteSink;

use crate::domain::SessionRecord;
use crate::error::Error;
use async_trait::async_trait;
use config::SinkKind;

/// Receives closed sessions. Failures are reported to the caller, which logs
/// them; records are never retried.
#[async_trait]
pub trait SessionSink: Send + Sync {
    async fn record(&self, record: &SessionRecord) -> Result<(), Error>;
}

/// Build the sink selected by the configuration.
pub async fn from_config(config: &config::Sink) -> Result<Box<dyn SessionSink>, Error> {
    let path = || config.path.clone().ok_or(Error::MissingSinkPath(config.kind));
    let sink: Box<dyn SessionSink> = match config.kind {
        SinkKind::Log => Box::new(LogSink),
        SinkKind::Sqlite => Box::new(SqliteSink::new(path()?).await?),
        SinkKind::JsonLines => Box::new(JsonLinesSink::new(path()?).await?),
    };
    Ok(sink)
}
