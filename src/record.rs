//! Carries all data needed to render one log line. The same tuple is what
//! the pre-registration buffer stores and what a writer's queue consumes.

use crate::level::Level;
use chrono::{DateTime, Local};
use std::path::Path;

/// One submitted message, stamped with its arrival time and origin thread.
#[derive(Debug, Clone)]
pub struct Record {
    /// Stamped at submission, not at write time, so a message buffered for
    /// a while still reports when it was emitted.
    pub timestamp: DateTime<Local>,
    /// Origin thread, as text; unique per live thread.
    pub thread_id: String,
    /// Routing key: which destination this message belongs to.
    pub module: String,
    pub level: Level,
    /// Calling function, when the caller (or a `log_*!` macro) supplied it.
    pub function: Option<String>,
    /// Source file basename; directories are stripped at stamp time.
    pub file: Option<String>,
    pub line: Option<u32>,
    pub message: String,
}

impl Record {
    /// Stamps timestamp and current-thread id; source coordinates are
    /// optional because most call sites don't supply them.
    #[must_use]
    pub fn stamp(
        module: &str,
        level: Level,
        message: &str,
        function: Option<&str>,
        file: Option<&str>,
        line: Option<u32>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            thread_id: current_thread_id(),
            module: module.to_string(),
            level,
            function: function.map(ToString::to_string),
            file: file.map(file_basename),
            line,
            message: message.to_string(),
        }
    }
}

/// Full paths would bloat every rendered line; only the basename carries
/// diagnostic value.
fn file_basename(file: &str) -> String {
    Path::new(file)
        .file_name()
        .map_or_else(|| file.to_string(), |n| n.to_string_lossy().into_owned())
}

/// `ThreadId` exposes no public integer; the `Debug` form (`ThreadId(n)`) is
/// unique per thread, so the digits are lifted out of it.
#[must_use]
pub fn current_thread_id() -> String {
    let id = format!("{:?}", std::thread::current().id());
    id.trim_start_matches("ThreadId(")
        .trim_end_matches(')')
        .to_string()
}
