//! Login autostart through an XDG desktop entry.

use crate::error::Error;
use std::path::{Path, PathBuf};
use tracing::info;

pub const ENTRY_FILE: &str = "gamelog.desktop";

/// `$XDG_CONFIG_HOME/autostart`, falling back to `~/.config/autostart`.
pub fn autostart_dir() -> Result<PathBuf, Error> {
    dirs::config_dir()
        .map(|dir| dir.join("autostart"))
        .ok_or(Error::NoConfigDir)
}

/// Desktop entry that launches `exe run`, with the config file if one was
/// given.
pub fn desktop_entry(exe: &Path, conffile: Option<&Path>) -> String {
    let mut exec = quote(exe);
    if let Some(conffile) = conffile {
        exec.push_str(" --conffile ");
        exec.push_str(&quote(conffile));
    }
    exec.push_str(" run");

    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=Gamelog\n\
         Comment=Record game sessions\n\
         Exec={exec}\n\
         Terminal=false\n\
         X-GNOME-Autostart-enabled=true\n"
    )
}

fn quote(path: &Path) -> String {
    let escaped = path
        .to_string_lossy()
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('`', "\\`")
        .replace('$', "\\$");
    format!("\"{escaped}\"")
}

/// Write the entry into `dir`. Returns its path.
pub fn install(dir: &Path, exe: &Path, conffile: Option<&Path>) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(ENTRY_FILE);
    std::fs::write(&path, desktop_entry(exe, conffile))?;
    info!(path = %path.display(), "autostart entry installed");
    Ok(path)
}

/// Remove the entry from `dir`. Returns its path if there was one.
pub fn uninstall(dir: &Path) -> Result<Option<PathBuf>, Error> {
    let path = dir.join(ENTRY_FILE);
    match std::fs::remove_file(&path) {
        Ok(()) => {
            info!(path = %path.display(), "autostart entry removed");
            Ok(Some(path))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
