//! Where dockyard keeps its files
//!
//! - `config.yaml`: dock and panel registry, layout metrics
//! - `layout.json`: the saved layout snapshot
//! - `logs/`: daily-rotated debug logs
//!
//! The base directory is `$DOCKYARD_CONFIG_DIR` when set, otherwise
//! `$XDG_CONFIG_HOME/dockyard` or `~/.config/dockyard` on Unix/macOS and
//! `%APPDATA%\dockyard` on Windows.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

const APP_DIR: &str = "dockyard";

/// Environment variable that relocates every dockyard file
pub const CONFIG_DIR_ENV: &str = "DOCKYARD_CONFIG_DIR";

/// Prefix of the rolling log files (`dockyard.log.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "dockyard.log";

/// Base config directory
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let platform = env::var_os("APPDATA").map(PathBuf::from);
    #[cfg(not(target_os = "windows"))]
    let platform = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")));

    resolve_config_dir(env::var_os(CONFIG_DIR_ENV).map(PathBuf::from), platform)
}

/// An explicit directory wins; a platform base gets the app directory appended
fn resolve_config_dir(explicit: Option<PathBuf>, platform: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(|| platform.map(|base| base.join(APP_DIR)))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn layout_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("layout.json"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory (and the config directory above it) if needed
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let logs = logs_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No config directory available"))?;
    fs::create_dir_all(&logs)?;
    Ok(logs)
}
