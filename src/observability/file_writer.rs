//! Size-rotated append-only file for trace output.
//!
//! Once the live file grows past its limit it is renamed to
//! `<name>.<unix-nanos>` and a new one is started. Only the newest
//! backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Rotation threshold for the live trace file (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the live one.
pub const DEFAULT_BACKUPS: usize = 3;

/// Thread-safe line writer with size-based rotation.
///
/// The file is opened lazily on the first write, so construction never
/// fails.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is over
    /// its limit.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation, opening or writing fails, or if the
    /// internal lock was poisoned.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if self.over_limit() {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = handle.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file not open"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn over_limit(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));

        if self.path.exists() {
            fs::rename(&self.path, PathBuf::from(backup))?;
        }
        self.prune_backups()
    }

    /// Deletes the oldest backups beyond the retention count. Failures to
    /// remove a single file are ignored.
    fn prune_backups(&self) -> io::Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        let Some(live_name) = self.path.file_name().and_then(|n| n.to_str()) else {
            return Ok(());
        };
        let prefix = format!("{live_name}.");

        let mut backups: Vec<(String, PathBuf)> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let stamp = name.strip_prefix(&prefix)?;
                stamp.chars().all(|c| c.is_ascii_digit()).then(|| (stamp.to_string(), entry.path()))
            })
            .collect();

        // Newest first, comparing stamps numerically.
        backups.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| b.cmp(a)));

        for (_, stale) in backups.iter().skip(self.backups) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backup_count(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("trace.json."))
            .count()
    }

    #[test]
    fn appends_lines_to_the_live_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::new(dir.path().join("trace.json"));

        writer.append_line("{\"a\":1}").unwrap();
        writer.append_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(backup_count(dir.path()), 0);
    }

    #[test]
    fn rotates_past_the_limit_and_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::with_limits(dir.path().join("trace.json"), 8, 2);

        for i in 0..6 {
            writer.append_line(&format!("line-number-{i}")).unwrap();
        }

        assert!(backup_count(dir.path()) <= 2);
        let live = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(live, "line-number-5\n");
    }
}
