#![forbid(unsafe_code)]

use super::SessionSink;
use crate::domain::{SessionRecord, iso8601};
use crate::error::Error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::PathBuf;
use tracing::debug;

/// Appends closed sessions to a `sessions` table.
#[derive(Debug, Clone)]
pub struct SqliteSink {
    path: PathBuf,
    pool: SqlitePool,
}

impl SqliteSink {
    /// Open (or create) the database at `path` and run migrations.
    pub async fn new(path: PathBuf) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(sqlx::Error::from)?;

        Ok(Self { path, pool })
    }

    /// All recorded sessions, oldest first.
    pub async fn records(&self) -> Result<Vec<SessionRecord>, Error> {
        let rows = sqlx::query(
            "SELECT game_name, duration_minutes, started_at, ended_at FROM sessions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let started_at: String = row.try_get("started_at")?;
            let ended_at: String = row.try_get("ended_at")?;
            records.push(SessionRecord {
                game_name: row.try_get("game_name")?,
                duration_minutes: row.try_get("duration_minutes")?,
                started_at: parse_time(&started_at)?,
                ended_at: parse_time(&ended_at)?,
            });
        }
        Ok(records)
    }
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|err| Error::Sqlx(sqlx::Error::Decode(Box::new(err))))
}

#[async_trait]
impl SessionSink for SqliteSink {
    async fn record(&self, record: &SessionRecord) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO sessions (game_name, duration_minutes, started_at, ended_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&record.game_name)
        .bind(record.duration_minutes)
        .bind(iso8601(record.started_at))
        .bind(iso8601(record.ended_at))
        .execute(&self.pool)
        .await?;

        debug!(path = %self.path.display(), game = %record.game_name, "session persisted");
        Ok(())
    }
}
