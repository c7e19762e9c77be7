use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::{Path, PathBuf};

/// Gamelog: records how long you play.
///
/// Gamelog watches running processes, recognizes games installed under your
/// library folders, and records one row per play session once the game
/// exits.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, value_parser = validate_file)]
    pub conffile: Option<PathBuf>,

    /// Path to log file.
    ///
    /// Logs go to stderr when not set.
    #[arg(short, long)]
    pub logfile: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Watch processes and record sessions until terminated (default).
    #[default]
    Run,
    /// Start gamelog automatically at login.
    Install,
    /// Remove the login autostart entry.
    Uninstall,
    /// Print the library roots and the games found under them.
    Catalog,
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.exists() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_defaults_to_run() {
        let cli = Cli::try_parse_from(["gamelog", "-vv"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Command::Run);
    }

    #[test]
    fn missing_conffile_is_rejected() {
        let err = Cli::try_parse_from(["gamelog", "-c", "/nonexistent/gamelog.toml", "run"]);
        assert!(err.is_err());
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["gamelog", "-l", "/tmp/gamelog.log", "install"]).unwrap();
        assert_eq!(cli.command, Some(Command::Install));
        assert_eq!(cli.logfile, Some(PathBuf::from("/tmp/gamelog.log")));
    }
}
