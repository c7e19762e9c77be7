#![forbid(unsafe_code)]

mod catalog;
mod error;
mod monitor;
mod sink;
mod sink_kind;

pub use catalog::Catalog;
pub use error::Error;
pub use monitor::Monitor;
pub use sink::Sink;
pub use sink_kind::SinkKind;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of the environment variables that override file values.
///
/// Nested keys are separated by `__`, e.g. `GAMELOG_MONITOR__POLL_INTERVAL=3`.
pub const ENV_PREFIX: &str = "GAMELOG_";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub monitor: Monitor,
    pub catalog: Catalog,
    pub sink: Sink,
}

impl Config {
    /// Defaults overridden by the environment.
    pub fn new() -> Result<Self, Error> {
        Self::figment()
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Error::from)
    }

    /// Defaults, then the TOML file at `path`, then the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::figment()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Error::from)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    /// Reject values the monitor cannot start with.
    pub fn validate(&self) -> Result<(), Error> {
        self.monitor.validate()?;
        self.sink.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::{path::PathBuf, time::Duration};

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.monitor.poll_interval, Duration::from_secs(5));
        assert_eq!(config.monitor.min_memory_bytes, 2 * 1024 * 1024 * 1024);
        assert_eq!(config.sink.kind, SinkKind::Log);
        assert!(config.catalog.roots.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "gamelog.toml",
                r#"
                [monitor]
                poll_interval = 2
                min_memory_bytes = 1024

                [catalog]
                roots = ["/games", "/mnt/*/SteamLibrary/steamapps/common"]

                [sink]
                kind = "sqlite"
                path = "/var/lib/gamelog/sessions.db"
                "#,
            )?;

            let config = Config::load("gamelog.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.monitor.poll_interval, Duration::from_secs(2));
            assert_eq!(config.monitor.min_memory_bytes, 1024);
            assert_eq!(config.catalog.roots.len(), 2);
            assert_eq!(config.sink.kind, SinkKind::Sqlite);
            assert_eq!(
                config.sink.path,
                Some(PathBuf::from("/var/lib/gamelog/sessions.db"))
            );
            // untouched sections keep their defaults
            assert_eq!(config.sink.timeout, Duration::from_secs(10));
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("gamelog.toml", "[monitor]\npoll_interval = 2\n")?;
            jail.set_env("GAMELOG_MONITOR__POLL_INTERVAL", "9");
            jail.set_env("GAMELOG_SINK__KIND", "jsonl");
            jail.set_env("GAMELOG_SINK__PATH", "/tmp/sessions.jsonl");

            let config = Config::load("gamelog.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.monitor.poll_interval, Duration::from_secs(9));
            assert_eq!(config.sink.kind, SinkKind::JsonLines);
            config.validate().map_err(|e| e.to_string())?;
            Ok(())
        });
    }

    #[test]
    fn zero_interval_is_fatal() {
        let mut config = Config::default();
        config.monitor.poll_interval = Duration::ZERO;
        assert!(matches!(config.validate(), Err(Error::InvalidValue { .. })));
    }
}
