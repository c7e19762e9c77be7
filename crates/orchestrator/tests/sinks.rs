#![forbid(unsafe_code)]

mod common;

use chrono::Duration;
use common::start;
use config::SinkKind;
use orchestrator::SessionSink;
use orchestrator::domain::{Session, SessionRecord};
use orchestrator::sink::{JsonLinesSink, SqliteSink, from_config};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn records() -> Vec<SessionRecord> {
    vec![
        Session::open("Wukong", 100, start()).close(start() + Duration::minutes(95)),
        Session::open("Hades", 200, start()).close(start() + Duration::seconds(42)),
    ]
}

#[tokio::test]
async fn sqlite_sink_appends_rows() {
    let dir = tempdir().unwrap();
    let sink = SqliteSink::new(dir.path().join("nested").join("sessions.db"))
        .await
        .unwrap();

    for record in &records() {
        sink.record(record).await.unwrap();
    }

    assert_eq!(sink.records().await.unwrap(), records());
}

#[tokio::test]
async fn jsonl_sink_appends_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sessions.jsonl");
    let sink = JsonLinesSink::new(path.clone()).await.unwrap();

    for record in &records() {
        sink.record(record).await.unwrap();
    }

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.starts_with(r#"{"game_name":"Wukong","duration_minutes":95.0,"#));
    assert_eq!(sink.records().await.unwrap(), records());
}

#[tokio::test]
async fn file_sinks_require_a_path() {
    let config = config::Sink {
        kind: SinkKind::Sqlite,
        path: None,
        ..Default::default()
    };
    assert!(matches!(
        from_config(&config).await,
        Err(orchestrator::Error::MissingSinkPath(SinkKind::Sqlite))
    ));
}
