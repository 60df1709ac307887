use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::{Duration as ChronoDuration, Utc};
use ytlinkcore::core::retention::{run_sweep, start_sweeper_task, sweep, sweep_at};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn write_aged(dir: &Path, name: &str, age: Duration) {
    let path = dir.join(name);
    fs::write(&path, b"data").unwrap();
    let file = File::options().write(true).open(&path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}

fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_sweep_removes_only_expired_regular_files() {
    let dir = tempfile::tempdir().unwrap();
    write_aged(dir.path(), "old-aaa.mp4", DAY * 10);
    write_aged(dir.path(), "older-bbb.mp3", DAY * 30);
    write_aged(dir.path(), "fresh-ccc.mp4", DAY);
    write_aged(dir.path(), "stale-ddd.webm.part", DAY * 30);
    write_aged(dir.path(), "stale-eee.webm.ytdl", DAY * 30);
    fs::create_dir(dir.path().join("nested")).unwrap();
    write_aged(&dir.path().join("nested"), "deep-fff.mp4", DAY * 30);

    let removed = sweep(dir.path(), 7).unwrap();

    assert_eq!(removed, 2);
    assert_eq!(
        names(dir.path()),
        vec!["fresh-ccc.mp4", "nested", "stale-ddd.webm.part", "stale-eee.webm.ytdl"]
    );
    // Not recursive
    assert!(dir.path().join("nested").join("deep-fff.mp4").exists());
}

#[test]
fn test_sweep_zero_days_never_deletes() {
    let dir = tempfile::tempdir().unwrap();
    write_aged(dir.path(), "ancient-aaa.mp4", DAY * 3650);
    write_aged(dir.path(), "new-bbb.mp4", Duration::ZERO);

    assert_eq!(sweep(dir.path(), 0).unwrap(), 0);
    assert_eq!(names(dir.path()).len(), 2);
}

#[test]
fn test_sweep_at_uses_given_clock() {
    let dir = tempfile::tempdir().unwrap();
    write_aged(dir.path(), "a-1.mp4", Duration::ZERO);

    // Two days from now, a one-day window makes the fresh file expired
    let later = Utc::now() + ChronoDuration::days(2);
    assert_eq!(sweep_at(dir.path(), 3, later).unwrap(), 0);
    assert_eq!(sweep_at(dir.path(), 1, later).unwrap(), 1);
    assert!(names(dir.path()).is_empty());
}

#[test]
fn test_sweep_twice_is_harmless() {
    let dir = tempfile::tempdir().unwrap();
    write_aged(dir.path(), "old-aaa.mp4", DAY * 10);

    assert_eq!(sweep(dir.path(), 1).unwrap(), 1);
    assert_eq!(sweep(dir.path(), 1).unwrap(), 0);
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed() {
    let target_dir = tempfile::tempdir().unwrap();
    write_aged(target_dir.path(), "keep-aaa.mp4", DAY * 30);

    let dir = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(target_dir.path().join("keep-aaa.mp4"), dir.path().join("link-aaa.mp4")).unwrap();

    assert_eq!(sweep(dir.path(), 1).unwrap(), 0);
    assert!(target_dir.path().join("keep-aaa.mp4").exists());
}

#[test]
fn test_run_sweep_swallows_errors() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("file.txt");
    fs::write(&not_a_dir, b"x").unwrap();

    // read_dir on a regular file fails; the cycle is skipped, not fatal
    assert!(sweep(&not_a_dir, 1).is_err());
    assert_eq!(run_sweep(&not_a_dir, 1), 0);
}

#[tokio::test]
async fn test_sweeper_task_sweeps_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    write_aged(dir.path(), "old-aaa.mp4", DAY * 10);
    write_aged(dir.path(), "fresh-bbb.mp4", Duration::ZERO);

    let handle = start_sweeper_task(dir.path().to_path_buf(), 7, Duration::from_secs(3600));

    // Well before the first period elapses
    let old = dir.path().join("old-aaa.mp4");
    for _ in 0..100 {
        if !old.exists() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    handle.abort();

    assert!(!old.exists());
    assert_eq!(names(dir.path()), vec!["fresh-bbb.mp4"]);
}
