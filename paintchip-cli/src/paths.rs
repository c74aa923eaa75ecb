//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Local;
use directories::ProjectDirs;
use paintchip_lib::download::COLORS_FILE;
use paintchip_lib::download::INVALID_CODES_FILE;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "paintchip";
const APPLICATION: &str = "paintchip";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the data directory for the archive, lookup table and cache.
///
/// - Linux: `$XDG_DATA_HOME/paintchip` or `~/.local/share/paintchip`
/// - macOS: `~/Library/Application Support/dev.paintchip.paintchip`
/// - Windows: `C:\Users\<User>\AppData\Roaming\paintchip\paintchip\data`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/paintchip` or `~/.cache/paintchip`
/// - macOS: `~/Library/Caches/dev.paintchip.paintchip`
/// - Windows: `C:\Users\<User>\AppData\Local\paintchip\paintchip\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the lookup cache database.
pub fn cache_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("cache.db"))
}

/// Get the path to the downloaded colors archive.
pub fn colors_file() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(COLORS_FILE))
}

/// Get the path to the invalid codes archive.
pub fn invalid_codes_file() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(INVALID_CODES_FILE))
}

/// Get the path to the bulk lookup table.
pub fn lookup_file() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("colorLookup.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Archived logs kept next to `latest.log`.
const MAX_OLD_LOGS: usize = 25;

const ARCHIVED_LOG_PREFIX: &str = "paintchip-";

/// Archives the previous `latest.log` and prunes old archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    if let Some(dir) = cache_dir() {
        rotate_logs_in(&dir, MAX_OLD_LOGS);
    }
}

/// Renames `latest.log` after its last write time and keeps the newest `keep`
/// archives. Errors are ignored.
fn rotate_logs_in(dir: &Path, keep: usize) {
    let latest = dir.join("latest.log");
    if let Ok(metadata) = fs::metadata(&latest) {
        let written: DateTime<Local> = metadata
            .modified()
            .map(DateTime::from)
            .unwrap_or_else(|_| Local::now());
        let archived = dir.join(format!(
            "{}{}.log",
            ARCHIVED_LOG_PREFIX,
            written.format("%Y%m%d_%H%M%S%.3f")
        ));
        let _ = fs::rename(&latest, archived);
    }

    let Ok(entries) = fs::read_dir(dir) else { return };
    let mut archives: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(ARCHIVED_LOG_PREFIX) && name.ends_with(".log"))
        })
        .collect();

    // Timestamped names sort oldest first.
    archives.sort();
    let excess = archives.len().saturating_sub(keep);
    for path in &archives[..excess] {
        let _ = fs::remove_file(path);
    }
}

/// Resolves an optional explicit path against a platform default.
pub fn resolve(explicit: Option<PathBuf>, default: fn() -> Option<PathBuf>, what: &str) -> anyhow::Result<PathBuf> {
    match explicit.or_else(default) {
        Some(path) => Ok(path),
        None => anyhow::bail!("Could not determine a default {} path; pass it explicitly", what),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_archives_latest_and_prunes() {
        let dir = tempfile::tempdir().unwrap();
        for stamp in ["20240101_000000.000", "20240102_000000.000", "20240103_000000.000"] {
            fs::write(dir.path().join(format!("paintchip-{}.log", stamp)), "old").unwrap();
        }
        fs::write(dir.path().join("notes.log"), "unrelated").unwrap();
        fs::write(dir.path().join("latest.log"), "previous run").unwrap();

        rotate_logs_in(dir.path(), 2);

        assert!(!dir.path().join("latest.log").exists());
        assert!(dir.path().join("notes.log").exists());
        assert!(!dir.path().join("paintchip-20240101_000000.000.log").exists());
        assert!(!dir.path().join("paintchip-20240102_000000.000.log").exists());

        let kept: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("paintchip-"))
            .collect();
        assert_eq!(kept.len(), 2);
        assert!(kept.contains(&"paintchip-20240103_000000.000.log".to_string()));
    }
}
