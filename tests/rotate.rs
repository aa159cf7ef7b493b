//! Tests for rotation naming and the rename-before-append policy.

use chrono::TimeZone;
use modulog::rotate::{self, RotationPolicy};
use modulog::FileTag;
use std::fs;
use tempfile::tempdir;

fn fixed_time() -> chrono::DateTime<chrono::Local> {
    chrono::Local
        .with_ymd_and_hms(2025, 1, 15, 14, 30, 5)
        .unwrap()
}

#[test]
fn date_tagged_name() {
    let name = rotate::date_tagged(std::path::Path::new("/var/app/net.log"), fixed_time());
    assert_eq!(
        name,
        std::path::PathBuf::from("/var/app/net_15_01_25__14_30_05.log")
    );
}

#[test]
fn date_tagged_without_extension() {
    let name = rotate::date_tagged(std::path::Path::new("/var/app/queue"), fixed_time());
    assert_eq!(
        name,
        std::path::PathBuf::from("/var/app/queue_15_01_25__14_30_05")
    );
}

#[test]
fn numbered_picks_first_unused() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("net.log");

    assert_eq!(rotate::numbered(&base), Some(dir.path().join("net(1).log")));

    fs::write(dir.path().join("net(1).log"), "x").unwrap();
    fs::write(dir.path().join("net(2).log"), "x").unwrap();
    assert_eq!(rotate::numbered(&base), Some(dir.path().join("net(3).log")));
}

#[test]
fn numbered_fails_closed_when_exhausted() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("net.log");

    for n in 1..=rotate::PROBE_LIMIT {
        fs::write(dir.path().join(format!("net({n}).log")), "").unwrap();
    }

    assert_eq!(rotate::numbered(&base), None);
}

#[test]
fn should_rotate_only_at_limit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.log");
    let policy = RotationPolicy::new(8, FileTag::Number);

    assert!(!policy.should_rotate(&path)); // missing file

    fs::write(&path, "1234567").unwrap();
    assert!(!policy.should_rotate(&path));

    fs::write(&path, "12345678").unwrap();
    assert!(policy.should_rotate(&path));
}

#[test]
fn rotate_preserves_content_exactly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.log");
    fs::write(&path, "old content past the limit\n").unwrap();

    let policy = RotationPolicy::new(4, FileTag::Number);
    let rotated = policy.rotate_if_full(&path).unwrap();

    assert_eq!(rotated, dir.path().join("a(1).log"));
    assert!(!path.exists());
    assert_eq!(
        fs::read_to_string(&rotated).unwrap(),
        "old content past the limit\n"
    );
}

#[test]
fn under_limit_does_not_rotate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.log");
    fs::write(&path, "ok").unwrap();

    let policy = RotationPolicy::new(1024, FileTag::Number);
    assert_eq!(policy.rotate_if_full(&path), None);
    assert!(path.exists());
}

#[test]
fn tagged_initial_numbered() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("session.log");

    let first = rotate::tagged_initial(&base, FileTag::Number, fixed_time());
    assert_eq!(first, dir.path().join("session(1).log"));

    fs::write(dir.path().join("session(1).log"), "x").unwrap();
    let second = rotate::tagged_initial(&base, FileTag::Number, fixed_time());
    assert_eq!(second, dir.path().join("session(2).log"));
}

#[test]
fn tagged_initial_datetime() {
    let base = std::path::PathBuf::from("/tmp/session.log");
    let name = rotate::tagged_initial(&base, FileTag::DateTime, fixed_time());
    assert_eq!(
        name,
        std::path::PathBuf::from("/tmp/session_15_01_25__14_30_05.log")
    );
}
