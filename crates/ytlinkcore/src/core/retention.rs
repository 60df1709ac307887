//! Retention sweeping for the download directory
//!
//! Deletes downloaded files once they are older than the configured
//! retention window. Runs once at startup and then on a fixed period.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::error::AppError;

/// Filename suffixes of downloads that are still being written
pub const IN_PROGRESS_SUFFIXES: &[&str] = &[".part", ".ytdl"];

/// Whether `name` belongs to a download that yt-dlp is still writing
pub fn is_in_progress(name: &str) -> bool {
    IN_PROGRESS_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Deletes regular files in `dir` older than `max_age_days`.
///
/// Returns the number of files removed. `max_age_days == 0` is a no-op.
/// A missing directory counts as empty.
pub fn sweep(dir: &Path, max_age_days: u64) -> Result<usize, AppError> {
    sweep_at(dir, max_age_days, Utc::now())
}

/// [`sweep`] with an explicit notion of "now".
///
/// Per-file failures are logged and skipped; only failing to list the
/// directory is returned as an error.
pub fn sweep_at(dir: &Path, max_age_days: u64, now: DateTime<Utc>) -> Result<usize, AppError> {
    if max_age_days == 0 {
        return Ok(0);
    }

    let days = i64::try_from(max_age_days).unwrap_or(i64::MAX);
    let cutoff = ChronoDuration::try_days(days)
        .and_then(|age| now.checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(AppError::Io(e)),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Failed to read entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        match remove_if_expired(&path, cutoff) {
            Ok(true) => removed += 1,
            Ok(false) => {}
            Err(e) => log::warn!("Failed to consider/remove {}: {}", path.display(), e),
        }
    }

    Ok(removed)
}

fn remove_if_expired(path: &Path, cutoff: DateTime<Utc>) -> std::io::Result<bool> {
    // symlink_metadata so a link into somewhere else is never followed and deleted as a file
    let metadata = std::fs::symlink_metadata(path)?;
    if !metadata.is_file() {
        return Ok(false);
    }

    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    if is_in_progress(&name) {
        return Ok(false);
    }

    let modified: DateTime<Utc> = metadata.modified()?.into();
    if modified >= cutoff {
        return Ok(false);
    }

    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Runs one sweep and logs the outcome. Never fails.
pub fn run_sweep(dir: &Path, max_age_days: u64) -> usize {
    match sweep(dir, max_age_days) {
        Ok(0) => {
            log::debug!("Cleanup: nothing to remove in {}", dir.display());
            0
        }
        Ok(removed) => {
            log::info!("🧹 Cleanup: removed {} old file(s) from {}", removed, dir.display());
            removed
        }
        Err(e) => {
            log::error!("Cleanup job failed for {}: {}", dir.display(), e);
            0
        }
    }
}

/// Start the background retention task
///
/// Sweeps immediately, then every `period`. With retention disabled the
/// task logs once and finishes. Returns the JoinHandle so callers can
/// observe panics or abort it on shutdown.
pub fn start_sweeper_task(dir: PathBuf, max_age_days: u64, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if max_age_days == 0 {
            log::info!("Retention sweeper disabled (CLEANING_INTERVAL_DAYS=0)");
            return;
        }

        log::info!(
            "🧹 Retention sweeper started for {} (max age: {} day(s), interval: {}s)",
            dir.display(),
            max_age_days,
            period.as_secs()
        );

        // The first tick completes immediately, giving the startup sweep
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let sweep_dir = dir.clone();
            let result = tokio::task::spawn_blocking(move || run_sweep(&sweep_dir, max_age_days)).await;
            if let Err(e) = result {
                log::error!("Retention sweep task failed: {}", e);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_suffixes() {
        assert!(is_in_progress("Song-xyz.webm.part"));
        assert!(is_in_progress("Song-xyz.webm.ytdl"));
        assert!(!is_in_progress("Song-xyz.mp3"));
        assert!(!is_in_progress("part"));
    }

    #[test]
    fn test_sweep_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(sweep(&missing, 1).unwrap(), 0);
    }

    #[test]
    fn test_sweep_disabled_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a-1.mp4");
        std::fs::write(&file, b"x").unwrap();

        // Even with "now" far in the future nothing is removed
        let far_future = Utc::now() + ChronoDuration::days(10_000);
        assert_eq!(sweep_at(dir.path(), 0, far_future).unwrap(), 0);
        assert!(file.exists());
    }

    #[test]
    fn test_huge_retention_does_not_overflow() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a-1.mp4");
        std::fs::write(&file, b"x").unwrap();

        assert_eq!(sweep(dir.path(), u64::MAX).unwrap(), 0);
        assert!(file.exists());
    }

    #[tokio::test]
    async fn test_sweeper_task_disabled_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let handle = start_sweeper_task(dir.path().to_path_buf(), 0, Duration::from_secs(3600));
        handle.await.unwrap();
    }
}
