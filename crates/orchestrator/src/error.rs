#![forbid(unsafe_code)]

use config::SinkKind;
use std::{path::PathBuf, time::Duration};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read library root {root}: {source}")]
    LibraryRoot {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog source unavailable: {0}")]
    CatalogSource(String),

    #[error("process scan failed: {0}")]
    Scan(String),

    #[error("sink did not answer within {0:?}")]
    SinkTimeout(Duration),

    #[error("the {0:?} sink needs a path")]
    MissingSinkPath(SinkKind),
}
