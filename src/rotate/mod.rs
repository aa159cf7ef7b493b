//! File rotation policy: decides when a destination file is full and what
//! the renamed file is called. Name computation is pure; the single side
//! effect is the rename itself, performed only from a writer's consumer
//! loop so no two threads ever race on the same file.

use crate::level::FileTag;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Numeric-suffix probing stops here; past this many pre-existing numbered
/// files, rotation fails closed and the oversized file keeps growing.
pub const PROBE_LIMIT: u32 = 1000;

/// Size threshold plus naming style for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    max_size: u64,
    tag: FileTag,
}

impl RotationPolicy {
    #[must_use]
    pub const fn new(max_size: u64, tag: FileTag) -> Self {
        Self { max_size, tag }
    }

    /// A missing file never rotates; an unreadable one is treated as empty.
    #[must_use]
    pub fn should_rotate(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|m| m.len() >= self.max_size)
    }

    /// Renames `path` aside when it is at or past the size limit, returning
    /// the name it was moved to. The rename happens before any new content
    /// is appended, so already-written bytes are never lost. Failure to
    /// compute a name or to rename is non-fatal; `None` means "keep
    /// appending to the original file".
    #[must_use]
    pub fn rotate_if_full(&self, path: &Path) -> Option<PathBuf> {
        if !self.should_rotate(path) {
            return None;
        }

        let target = self.next_name(path, Local::now())?;
        // Renaming over an existing file would destroy its contents.
        if target.exists() {
            return None;
        }

        fs::rename(path, &target).ok().map(|()| target)
    }

    /// Pure name computation, separated from the rename so it can be tested
    /// without touching the filesystem (the numeric style still probes for
    /// unused names).
    #[must_use]
    pub fn next_name(&self, path: &Path, at: DateTime<Local>) -> Option<PathBuf> {
        match self.tag {
            FileTag::DateTime => Some(date_tagged(path, at)),
            FileTag::Number => numbered(path),
        }
    }
}

/// `<base>_<dd_MM_yy__hh_mm_ss>.<ext>`; underscores keep the name shell-safe.
#[must_use]
pub fn date_tagged(path: &Path, at: DateTime<Local>) -> PathBuf {
    let tag = at.format("%d_%m_%y__%H_%M_%S");
    sibling(path, &format!("_{tag}"))
}

/// `<base>(<n>).<ext>` for the smallest positive `n` not already on disk.
/// `None` once [`PROBE_LIMIT`] names are all taken.
#[must_use]
pub fn numbered(path: &Path) -> Option<PathBuf> {
    (1..=PROBE_LIMIT)
        .map(|n| sibling(path, &format!("({n})")))
        .find(|candidate| !candidate.exists())
}

/// Initial name for a single-but-tagged destination: the base name gets its
/// tag once, at creation, and is never rotated afterwards.
#[must_use]
pub fn tagged_initial(path: &Path, tag: FileTag, at: DateTime<Local>) -> PathBuf {
    match tag {
        FileTag::DateTime => date_tagged(path, at),
        // All probe slots taken is pathological; reuse the base name then.
        FileTag::Number => numbered(path).unwrap_or_else(|| path.to_path_buf()),
    }
}

/// Inserts `insert` between the file stem and the extension, preserving the
/// parent directory. Extension-less names just get the suffix appended.
fn sibling(path: &Path, insert: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    let name = path.extension().map_or_else(
        || format!("{stem}{insert}"),
        |ext| format!("{stem}{insert}.{}", ext.to_string_lossy()),
    );
    path.parent()
        .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
}
