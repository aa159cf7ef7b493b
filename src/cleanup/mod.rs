//! Without retention, log directories grow until the disk fills. This
//! module expires old files by age, optionally compressing instead of
//! deleting so content stays available for later forensics.

mod options;
mod result;
mod size;
mod stats;

pub use options::CleanupOptions;
pub use result::CleanupResult;
pub use size::{format_size, parse_size};
pub use stats::{LogFileInfo, LogStats};

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::SystemTime;

/// Removes (or compresses) expired files under `base_dir`, recursively.
///
/// A missing directory is not an error; there is simply nothing to clean.
///
/// # Errors
/// Directory traversal failures are surfaced; per-file failures are
/// collected in the result instead so one bad file doesn't abort the pass.
pub fn cleanup(base_dir: &Path, options: &CleanupOptions) -> Result<CleanupResult, crate::Error> {
    let mut result = CleanupResult::default();

    if !base_dir.exists() {
        return Ok(result);
    }

    let files = collect_log_files(base_dir, SystemTime::now())?;

    for file in &files {
        let expired = options
            .max_age_days
            .is_some_and(|max| file.age_days >= u64::from(max));
        if !(options.delete_all || expired) {
            continue;
        }

        if options.dry_run {
            result.would_delete.push(file.path.clone());
            result.would_free += file.size;
        } else if options.compress {
            match compress_file(Path::new(&file.path)) {
                Ok(saved) => {
                    result.compressed.push(file.path.clone());
                    result.compressed_saved += saved;
                }
                Err(e) => result.failed.push((file.path.clone(), e.to_string())),
            }
        } else if fs::remove_file(&file.path).is_ok() {
            result.deleted.push(file.path.clone());
            result.freed += file.size;
        }
    }

    if !options.dry_run {
        cleanup_empty_dirs(base_dir)?;
    }

    Ok(result)
}

/// Age-based expiry under `<folder>/logs`, the layout destinations write
/// into. The everyday "clear logs older than N days" call.
///
/// # Errors
/// Same failure surface as [`cleanup`].
pub fn clear_folder(folder: &Path, days: u32) -> Result<CleanupResult, crate::Error> {
    cleanup(
        &folder.join("logs"),
        &CleanupOptions::new().max_age_days(days),
    )
}

/// Gathers the same file inventory as [`cleanup`] but only reads.
///
/// # Errors
/// Directory traversal may fail on permission issues.
pub fn stats(base_dir: &Path) -> Result<LogStats, crate::Error> {
    let mut stats = LogStats::default();

    if !base_dir.exists() {
        return Ok(stats);
    }

    let files = collect_log_files(base_dir, SystemTime::now())?;

    stats.total_files = files.len();
    stats.total_size = files.iter().map(|f| f.size).sum();
    if let Some(oldest) = files.iter().max_by_key(|f| f.age_days) {
        stats.oldest_file = Some(oldest.path.clone());
    }
    if let Some(newest) = files.iter().min_by_key(|f| f.age_days) {
        stats.newest_file = Some(newest.path.clone());
    }
    stats.files = files;

    Ok(stats)
}

/// Age and size are gathered at scan time; re-statting later would race
/// with files changing between scan and action.
fn collect_log_files(dir: &Path, now: SystemTime) -> Result<Vec<LogFileInfo>, crate::Error> {
    let mut files = Vec::new();
    collect_recursive(dir, now, &mut files)?;
    Ok(files)
}

fn collect_recursive(
    dir: &Path,
    now: SystemTime,
    files: &mut Vec<LogFileInfo>,
) -> Result<(), crate::Error> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_recursive(&path, now, files)?;
        } else if path.extension().is_some_and(|e| e == "log")
            && let Ok(meta) = fs::metadata(&path)
        {
            let age_days = meta
                .modified()
                .ok()
                .and_then(|m| now.duration_since(m).ok())
                .map_or(0, |d| d.as_secs() / 86400);

            files.push(LogFileInfo {
                path: path.display().to_string(),
                size: meta.len(),
                age_days,
            });
        }
    }

    Ok(())
}

/// In-place compression (create .gz, remove original). Returns bytes saved
/// so callers can report totals.
fn compress_file(path: &Path) -> Result<u64, crate::Error> {
    let original_size = fs::metadata(path)?.len();
    let mut reader = BufReader::new(File::open(path)?);

    let gz_path = format!("{}.gz", path.display());
    let mut encoder = GzEncoder::new(
        BufWriter::new(File::create(&gz_path)?),
        Compression::default(),
    );
    std::io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    let compressed_size = fs::metadata(&gz_path)?.len();

    // The .gz now holds all content; remove the original to free the space.
    fs::remove_file(path)?;

    Ok(original_size.saturating_sub(compressed_size))
}

/// Empty directories left behind after deletion make the tree look
/// cluttered; removal silently fails on non-empty ones, which is expected.
fn cleanup_empty_dirs(dir: &Path) -> Result<(), crate::Error> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            cleanup_empty_dirs(&path)?;
            let _ = fs::remove_dir(&path);
        }
    }

    Ok(())
}
