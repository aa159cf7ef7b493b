//! Tracks outcomes of cleanup runs, split into actual vs dry-run results
//! so callers can report or preview without separate code paths.

/// What one cleanup pass did (or, in dry-run mode, would do).
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Successfully removed files.
    pub deleted: Vec<String>,
    /// Bytes recovered by deletion.
    pub freed: u64,
    /// Dry run keeps its own list because nothing was actually removed.
    pub would_delete: Vec<String>,
    /// Dry run estimate so callers can decide before committing.
    pub would_free: u64,
    /// Compression is tracked separately; it reclaims less than deletion.
    pub compressed: Vec<String>,
    /// Bytes saved by compression.
    pub compressed_saved: u64,
    /// Files that could not be processed, with the reason.
    pub failed: Vec<(String, String)>,
}

impl CleanupResult {
    /// Unifies actual and dry-run counts so callers don't branch on mode.
    #[must_use]
    pub const fn count(&self) -> usize {
        if self.deleted.is_empty() {
            self.would_delete.len()
        } else {
            self.deleted.len()
        }
    }

    /// Unifies actual and dry-run byte counts.
    #[must_use]
    pub const fn bytes(&self) -> u64 {
        if self.freed == 0 {
            self.would_free
        } else {
            self.freed
        }
    }
}
