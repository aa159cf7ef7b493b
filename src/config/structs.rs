//! Configuration struct definitions.

use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default level threshold for new destinations.
    pub level: String,
    /// Default mode for new destinations (disabled, console, file, full).
    pub mode: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "warning".to_string(),
            mode: "file".to_string(),
        }
    }
}

/// Destination file configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Folder whose `logs/` subdirectory receives the files. Empty means
    /// the platform state directory, falling back to the current directory.
    pub folder: String,
    /// Default file name; empty means the date-named `yyyy-MM-dd.log`.
    pub name: String,
    /// Rotation threshold, "500K"/"1M"-style.
    pub max_size: String,
    /// Naming style for rotated files (datetime, number).
    pub tag: String,
    /// File lifecycle (single, single-tagged, split).
    pub handling: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            folder: String::new(),
            name: String::new(),
            max_size: "1M".to_string(),
            tag: "datetime".to_string(),
            handling: "split".to_string(),
        }
    }
}

/// Which fields rendered lines carry, one switch per segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub level: bool,
    pub module: bool,
    pub timestamp: bool,
    pub thread_id: bool,
    pub function: bool,
    pub file: bool,
    pub line: bool,
    pub message: bool,
}

impl Default for DisplayConfig {
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

/// Log retention configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RetentionConfig {
    /// Maximum age in days; zero disables age-based cleanup.
    pub max_age_days: u32,
    /// Compress expired files instead of deleting them.
    pub compress: bool,
}
