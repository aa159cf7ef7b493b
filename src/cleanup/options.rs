//! Separated from the cleanup engine so callers can construct retention
//! policies without importing filesystem internals.

/// All filters default to off so nothing gets deleted without explicit opt-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupOptions {
    /// Prevents unbounded log growth by expiring old files.
    pub max_age_days: Option<u32>,
    /// Escape hatch for "remove everything" without configuring filters.
    pub delete_all: bool,
    /// Destructive operations need a preview mode to avoid accidents.
    pub dry_run: bool,
    /// Some users must retain logs but can't spare the disk space.
    pub compress: bool,
}

impl CleanupOptions {
    /// Defaults are safe: nothing gets processed until a filter is enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expires files older than the given number of days.
    #[must_use]
    pub const fn max_age_days(mut self, days: u32) -> Self {
        self.max_age_days = Some(days);
        self
    }

    #[must_use]
    pub const fn delete_all(mut self, delete: bool) -> Self {
        self.delete_all = delete;
        self
    }

    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Gzip expired files in place instead of deleting them.
    #[must_use]
    pub const fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}
