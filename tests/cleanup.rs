//! Tests for retention: size grammar, age expiry, dry-run, compression.

use modulog::{CleanupOptions, cleanup, clear_folder, format_size, parse_size, stats};
use std::fs;
use tempfile::tempdir;

#[test]
fn parse_size_bytes() {
    assert_eq!(parse_size("100"), Some(100));
    assert_eq!(parse_size("1K"), Some(1024));
    assert_eq!(parse_size("1KB"), Some(1024));
    assert_eq!(parse_size("1M"), Some(1024 * 1024));
    assert_eq!(parse_size("1MB"), Some(1024 * 1024));
    assert_eq!(parse_size("1G"), Some(1024 * 1024 * 1024));
    assert_eq!(parse_size("500M"), Some(500 * 1024 * 1024));
    assert_eq!(parse_size("garbage"), None);
}

#[test]
fn format_size_bytes() {
    assert_eq!(format_size(100), "100 B");
    assert_eq!(format_size(1024), "1.00 KB");
    assert_eq!(format_size(1024 * 1024), "1.00 MB");
    assert_eq!(format_size(1024 * 1024 * 1024), "1.00 GB");
}

#[test]
fn cleanup_missing_base_is_empty() {
    let dir = tempdir().unwrap();
    let result = cleanup(&dir.path().join("nope"), &CleanupOptions::default()).unwrap();
    assert_eq!(result.count(), 0);
}

#[test]
fn cleanup_without_filters_touches_nothing() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("keep.log");
    fs::write(&log, "content").unwrap();

    let result = cleanup(dir.path(), &CleanupOptions::default()).unwrap();
    assert_eq!(result.count(), 0);
    assert!(log.exists());
}

#[test]
fn dry_run_reports_without_deleting() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("test.log");
    fs::write(&log, "test content").unwrap();

    let options = CleanupOptions::new().delete_all(true).dry_run(true);
    let result = cleanup(dir.path(), &options).unwrap();

    assert_eq!(result.would_delete.len(), 1);
    assert!(result.would_free > 0);
    assert!(result.deleted.is_empty());
    assert!(log.exists());
}

#[test]
fn delete_all_removes_log_files_only() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("test.log");
    let other = dir.path().join("notes.txt");
    fs::write(&log, "test content").unwrap();
    fs::write(&other, "keep me").unwrap();

    let result = cleanup(dir.path(), &CleanupOptions::new().delete_all(true)).unwrap();

    assert_eq!(result.deleted.len(), 1);
    assert!(result.freed > 0);
    assert!(!log.exists());
    assert!(other.exists());
}

#[test]
fn compress_replaces_file_with_gz() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("big.log");
    fs::write(&log, "line\n".repeat(200)).unwrap();

    let options = CleanupOptions::new().delete_all(true).compress(true);
    let result = cleanup(dir.path(), &options).unwrap();

    assert_eq!(result.compressed.len(), 1);
    assert!(result.compressed_saved > 0);
    assert!(!log.exists());
    assert!(dir.path().join("big.log.gz").exists());
}

#[test]
fn clear_folder_targets_the_logs_subdirectory() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir_all(&logs).unwrap();
    fs::write(logs.join("old.log"), "x").unwrap();
    let outside = dir.path().join("outside.log");
    fs::write(&outside, "x").unwrap();

    // Age zero expires everything under logs/, and only under logs/.
    let result = clear_folder(dir.path(), 0).unwrap();

    assert_eq!(result.deleted.len(), 1);
    assert!(!logs.join("old.log").exists());
    assert!(outside.exists());
}

#[test]
fn stats_inventory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.log"), "aaaa").unwrap();
    fs::write(dir.path().join("b.log"), "bbbbbbbb").unwrap();
    fs::write(dir.path().join("readme.md"), "not a log").unwrap();

    let stats = stats(dir.path()).unwrap();
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.total_size, 12);
    assert!(stats.oldest_file.is_some());
    assert!(stats.newest_file.is_some());
}

#[test]
fn cleanup_scans_nested_directories() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("2025").join("01");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("deep.log"), "x").unwrap();

    let result = cleanup(dir.path(), &CleanupOptions::new().delete_all(true)).unwrap();
    assert_eq!(result.deleted.len(), 1);
    // Emptied directories are swept away with the files.
    assert!(!nested.exists());
}
