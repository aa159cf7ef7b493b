//! Severity levels, destination modes, and file-naming styles that gate
//! which messages reach which destinations and how their files are named.

use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so a writer can compare a message's level against its
/// configured threshold; a message is accepted iff `level >= threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// High-volume instrumentation that would be too noisy outside of development.
    Trace = 0,
    /// Startup, teardown, and state-change details useful for diagnosing issues.
    Debug = 1,
    /// Normal operational milestones: destination added, config loaded, etc.
    #[default]
    Info = 2,
    /// Non-fatal anomalies that may need attention (retries, degraded paths).
    Warning = 3,
    /// Unrecoverable failures that prevent an operation from completing.
    Error = 4,
    /// Failures after which the application cannot continue.
    Fatal = 5,
}

impl Level {
    /// Lowercase because config files use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Capitalized form used inside rendered log lines (`[Info]`, `[Fatal]`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trace => "Trace",
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Fatal => "Fatal",
        }
    }

    /// Convenience for iteration, used by tests and help output.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Trace,
            Self::Debug,
            Self::Info,
            Self::Warning,
            Self::Error,
            Self::Fatal,
        ]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warning),
            "error" | "err" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Where a destination sends its accepted messages.
///
/// `Disabled` drops messages before they are formatted; the other modes
/// decide between console echo, file persistence, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Accept nothing: enqueue is a no-op without formatting or I/O.
    Disabled,
    /// Format and print, never touch the filesystem.
    OnlyConsole,
    /// Persist to file without echoing.
    #[default]
    OnlyFile,
    /// Persist to file and echo to console.
    Full,
}

impl Mode {
    /// Whether this mode appends to the destination file.
    #[must_use]
    pub const fn to_file(self) -> bool {
        matches!(self, Self::OnlyFile | Self::Full)
    }

    /// Whether this mode echoes rendered lines to the console.
    #[must_use]
    pub const fn to_console(self) -> bool {
        matches!(self, Self::OnlyConsole | Self::Full)
    }

    /// Lowercase because config files use lowercase mode strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::OnlyConsole => "console",
            Self::OnlyFile => "file",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so config loading can report the offending string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log mode: '{}'", self.0)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" | "off" => Ok(Self::Disabled),
            "console" | "onlyconsole" | "only-console" => Ok(Self::OnlyConsole),
            "file" | "onlyfile" | "only-file" => Ok(Self::OnlyFile),
            "full" => Ok(Self::Full),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Naming style for rotated (or tagged) log files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileTag {
    /// `<base>_<dd_MM_yy__hh_mm_ss>.<ext>`, collision-free down to the second.
    #[default]
    DateTime,
    /// `<base>(<n>).<ext>` with the smallest unused positive `n`.
    Number,
}

impl FromStr for FileTag {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "datetime" | "date-time" | "date" => Ok(Self::DateTime),
            "number" | "numbered" => Ok(Self::Number),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// How a destination file grows over its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileHandling {
    /// One file under the original name, unbounded.
    Single,
    /// One file under the original name plus a tag, unbounded.
    SingleTagged,
    /// Original name, renamed away and restarted whenever the size limit is hit.
    #[default]
    Split,
}

impl FromStr for FileHandling {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "singletagged" | "single-tagged" | "tagged" => Ok(Self::SingleTagged),
            "split" => Ok(Self::Split),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}
