//! Pure line rendering: maps a [`Record`] and a display-option set to one
//! line of text. No state, no I/O; the writer calls this at enqueue time so
//! the consumer loop only ever handles finished strings.

use crate::level::Level;
use crate::record::Record;

/// Independently toggleable fields for rendered lines.
///
/// Modeled as named bool fields rather than a dynamic flag bag, so every
/// option is addressable at compile time and struct-update syntax covers
/// customization: `DisplayOptions { function: true, ..DisplayOptions::default() }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub level: bool,
    pub module: bool,
    pub timestamp: bool,
    pub thread_id: bool,
    pub function: bool,
    pub file: bool,
    pub line: bool,
    pub message: bool,
}

impl Default for DisplayOptions {
    /// The default preset: everything except the calling function.
    fn default() -> Self {
        Self {
            level: true,
            module: true,
            timestamp: true,
            thread_id: true,
            function: false,
            file: true,
            line: true,
            message: true,
        }
    }
}

impl DisplayOptions {
    /// Every field on, including the calling function.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            level: true,
            module: true,
            timestamp: true,
            thread_id: true,
            function: true,
            file: true,
            line: true,
            message: true,
        }
    }

    /// Message-only lines for destinations that want bare text.
    #[must_use]
    pub const fn message_only() -> Self {
        Self {
            level: false,
            module: false,
            timestamp: false,
            thread_id: false,
            function: false,
            file: false,
            line: false,
            message: true,
        }
    }
}

/// Renders one line: `[Level] [module] [dd-MM-yyyy hh:mm:ss.zzz] [thread] {file:line} message\n`.
///
/// Source coordinates (function, file, line) are rendered only when the
/// destination's `threshold` is `Debug` or more verbose; production-level
/// destinations never leak source layout, whatever the options say.
#[must_use]
pub fn render(record: &Record, options: &DisplayOptions, threshold: Level) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(6);

    if options.level {
        parts.push(format!("[{}]", record.level.label()));
    }
    if options.module && !record.module.is_empty() {
        parts.push(format!("[{}]", record.module));
    }
    if options.timestamp {
        parts.push(format!(
            "[{}]",
            record.timestamp.format("%d-%m-%Y %H:%M:%S%.3f")
        ));
    }
    if options.thread_id && !record.thread_id.is_empty() {
        parts.push(format!("[{}]", record.thread_id));
    }

    if threshold <= Level::Debug {
        if options.function
            && let Some(function) = &record.function
            && !function.is_empty()
        {
            parts.push(format!("{{{function}}}"));
        }
        if options.file
            && let Some(file) = &record.file
            && !file.is_empty()
        {
            match record.line {
                Some(line) if options.line && line > 0 => {
                    parts.push(format!("{{{file}:{line}}}"));
                }
                _ => parts.push(format!("{{{file}}}")),
            }
        }
    }

    if options.message && !record.message.is_empty() {
        parts.push(record.message.clone());
    }

    let mut line = parts.join(" ");
    line.push('\n');
    line
}
