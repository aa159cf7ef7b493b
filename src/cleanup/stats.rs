//! Disk-usage inventory for a log directory: the read-only counterpart of
//! the cleanup pass, sharing its file discovery.

/// Metadata gathered at scan time for one log file.
#[derive(Debug, Clone)]
pub struct LogFileInfo {
    pub path: String,
    pub size: u64,
    pub age_days: u64,
}

/// Summary of everything under a log directory.
#[derive(Debug, Default)]
pub struct LogStats {
    pub total_files: usize,
    pub total_size: u64,
    pub oldest_file: Option<String>,
    pub newest_file: Option<String>,
    pub files: Vec<LogFileInfo>,
}
