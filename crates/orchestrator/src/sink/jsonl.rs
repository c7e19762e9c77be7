#![forbid(unsafe_code)]

use super::SessionSink;
use crate::domain::SessionRecord;
use crate::error::Error;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// Appends one JSON object per closed session.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    // serializes appends so lines never interleave
    lock: Mutex<()>,
}

impl JsonLinesSink {
    pub async fn new(path: PathBuf) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Read back every record in the file.
    pub async fn records(&self) -> Result<Vec<SessionRecord>, Error> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::from))
            .collect()
    }
}

#[async_trait]
impl SessionSink for JsonLinesSink {
    async fn record(&self, record: &SessionRecord) -> Result<(), Error> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let _guard = self.lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        debug!(path = %self.path.display(), game = %record.game_name, "record appended");
        Ok(())
    }
}
