//! Backup snapshots
//!
//! Before an existing file is overwritten it is copied to
//! `<path>.backup_<yyyyMMdd_HHmmss>`. Stamps have one-second resolution, so two
//! backups taken within the same second share a name and the later one wins.
//! Old snapshots are never removed here.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use super::StoreError;

/// Separator between the original file name and the timestamp.
pub const BACKUP_SEPARATOR: &str = ".backup_";

/// `chrono` format for the timestamp suffix.
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const STAMP_LEN: usize = 15;

/// Backup destination for `path` at `at`.
pub fn backup_path<Tz: TimeZone>(path: &Path, at: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SEPARATOR);
    name.push(at.format(STAMP_FORMAT).to_string());
    PathBuf::from(name)
}

/// Copy `path` to a timestamped sibling, replacing a same-second backup.
pub fn create_backup(path: &Path) -> Result<PathBuf, StoreError> {
    let dest = backup_path(path, &Local::now());
    fs::copy(path, &dest).map_err(|source| StoreError::Backup {
        path: dest.clone(),
        source,
    })?;
    tracing::debug!(backup = %dest.display(), "created backup");
    Ok(dest)
}

/// Existing backups of `path`, oldest first.
pub fn list_backups(path: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return Ok(Vec::new());
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let prefix = format!("{file_name}{BACKUP_SEPARATOR}");

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(StoreError::Io { path: dir, source }),
    };

    let mut backups = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.strip_prefix(&prefix).is_some_and(is_stamp) {
            backups.push(path.with_file_name(name));
        }
    }
    // yyyyMMdd_HHmmss sorts chronologically as text
    backups.sort();
    Ok(backups)
}

fn is_stamp(s: &str) -> bool {
    s.len() == STAMP_LEN
        && s.char_indices()
            .all(|(i, c)| if i == 8 { c == '_' } else { c.is_ascii_digit() })
}
