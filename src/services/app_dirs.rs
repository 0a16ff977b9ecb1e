//! XDG-compliant directory management
//!
//! Logs go to `$XDG_STATE_HOME/site-console/logs/` (typically
//! `~/.local/state/site-console/logs/`), one PID-named file per process so
//! concurrent runs do not interleave. The config file lives at
//! `$XDG_CONFIG_HOME/site-console/config.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

const APP_DIR: &str = "site-console";

/// Minimum age for log files to be cleaned up (24 hours)
const CLEANUP_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached log directory path
static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the log directory, creating it if necessary.
///
/// Falls back to the system temp directory when the state directory cannot
/// be created.
pub fn log_dir() -> &'static PathBuf {
    LOG_DIR.get_or_init(|| {
        let fallback = std::env::temp_dir().join("site-console-logs");
        let dir = xdg_log_dir().unwrap_or_else(|| fallback.clone());

        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("Failed to create log directory {:?}: {}", dir, e);
            return fallback;
        }

        dir
    })
}

fn xdg_log_dir() -> Option<PathBuf> {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        let path = PathBuf::from(state_home);
        if path.is_absolute() {
            return Some(path.join(APP_DIR).join("logs"));
        }
    }

    dirs::home_dir().map(|home| home.join(".local").join("state").join(APP_DIR).join("logs"))
}

/// `{log_dir}/site-console-{PID}.log`
pub fn main_log_path() -> PathBuf {
    log_dir().join(format!("{}-{}.log", APP_DIR, std::process::id()))
}

/// Directory holding `config.json`, if the platform has a config home.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Default location of the config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Remove this app's log files older than a day, except our own.
pub fn cleanup_stale_logs() {
    cleanup_stale_logs_in_dir(log_dir(), std::process::id(), CLEANUP_AGE);
}

fn cleanup_stale_logs_in_dir(dir: &Path, current_pid: u32, age: Duration) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        let Some(pid) = extract_pid_from_filename(&name) else {
            continue;
        };
        if pid == current_pid || !name.starts_with(APP_DIR) {
            continue;
        }

        if entry.file_type().map(|t| t.is_file()).unwrap_or(false)
            && is_file_older_than(&entry.path(), age)
        {
            if let Err(e) = fs::remove_file(entry.path()) {
                tracing::debug!("Failed to clean up stale log {:?}: {}", entry.path(), e);
            } else {
                tracing::debug!("Cleaned up stale log file: {:?}", entry.path());
            }
        }
    }
}

fn is_file_older_than(path: &Path, age: Duration) -> bool {
    let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };

    SystemTime::now()
        .duration_since(modified)
        .map(|elapsed| elapsed >= age)
        .unwrap_or(false)
}

/// Extract PID from a filename like "site-console-12345.log"
fn extract_pid_from_filename(name: &str) -> Option<u32> {
    let without_ext = name.strip_suffix(".log")?;
    let last_hyphen = without_ext.rfind('-')?;
    without_ext[last_hyphen + 1..].parse().ok()
}

/// Print every path the app reads or writes to stdout
pub fn print_all_paths() {
    use std::io::Write;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let unavailable = || PathBuf::from("<unavailable>");

    writeln!(handle, "site-console directories:").ok();
    writeln!(handle).ok();
    writeln!(
        handle,
        "Config:     {}",
        config_dir().unwrap_or_else(unavailable).display()
    )
    .ok();
    writeln!(
        handle,
        "  config.json:  {}",
        config_path().unwrap_or_else(unavailable).display()
    )
    .ok();
    writeln!(handle).ok();
    writeln!(handle, "Logs:       {}", log_dir().display()).ok();
    writeln!(handle, "  this run:     {}", main_log_path().display()).ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_is_absolute() {
        assert!(log_dir().is_absolute(), "Log directory should be absolute");
    }

    #[test]
    fn test_main_log_path_contains_pid() {
        let path = main_log_path();
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("site-console-"));
        assert!(name.ends_with(".log"));
        assert_eq!(
            extract_pid_from_filename(&name),
            Some(std::process::id())
        );
    }

    #[test]
    fn test_config_path_ends_with_app_dir() {
        if let Some(path) = config_path() {
            assert!(path.ends_with("site-console/config.json"));
        }
    }

    #[test]
    fn test_extract_pid_from_filename() {
        assert_eq!(extract_pid_from_filename("site-console-12345.log"), Some(12345));
        assert_eq!(extract_pid_from_filename("other-1.log"), Some(1));
        assert_eq!(extract_pid_from_filename("no-pid.txt"), None);
        assert_eq!(extract_pid_from_filename("invalid"), None);
    }

    #[test]
    fn test_cleanup_keeps_current_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let ours = dir.path().join("site-console-7.log");
        let stale = dir.path().join("site-console-8.log");
        let foreign = dir.path().join("notes-9.log");
        for path in [&ours, &stale, &foreign] {
            fs::write(path, "x").unwrap();
        }

        cleanup_stale_logs_in_dir(dir.path(), 7, Duration::ZERO);

        assert!(ours.exists());
        assert!(!stale.exists());
        assert!(foreign.exists());
    }
}
