//! TOML configuration loading.
//!
//! Separated from struct definitions so the loading logic (paths, tilde
//! expansion, lenient string-to-enum conversion) stays independent of the
//! serde schema.

mod structs;

pub use structs::{DisplayConfig, FileConfig, GeneralConfig, RetentionConfig};

use crate::fmt::DisplayOptions;
use crate::level::{FileHandling, FileTag, Level, Mode};
use crate::writer::DEFAULT_MAX_FILE_SIZE;
use std::fs;
use std::path::{Path, PathBuf};

/// A completely empty config file must still produce a working registry;
/// `#[serde(default)]` on every section ensures zero-config works out of
/// the box.
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Level and mode gate everything, so they sit above any file concern.
    pub general: GeneralConfig,
    /// Where destination files live and how they are named and rotated.
    pub file: FileConfig,
    /// Which segments each rendered line carries.
    pub display: DisplayConfig,
    /// Retention defaults so cleanup runs without flags every time.
    pub retention: RetentionConfig,
}

impl Config {
    /// Loads from the default location; a missing file yields defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or TOML parsing
    /// hits a syntax error.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path instead of the default
    /// location, for tests and embedders with their own config layout.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// XDG-compliant path under the user's config directory.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn default_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("modulog").join("modulog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Config stores the level as a string for TOML ergonomics. This
    /// converts to the typed enum, falling back to the built-in default.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        self.general.level.parse().unwrap_or(Level::Warning)
    }

    /// Lenient mode conversion; unknown strings keep file-only logging.
    #[must_use]
    pub fn parse_mode(&self) -> Mode {
        self.general.mode.parse().unwrap_or(Mode::OnlyFile)
    }

    #[must_use]
    pub fn parse_tag(&self) -> FileTag {
        self.file.tag.parse().unwrap_or_default()
    }

    #[must_use]
    pub fn parse_handling(&self) -> FileHandling {
        self.file.handling.parse().unwrap_or_default()
    }

    /// "500K"/"1M" notation to bytes; unparseable values keep the built-in
    /// rotation threshold.
    #[must_use]
    pub fn parse_max_size(&self) -> u64 {
        crate::cleanup::parse_size(&self.file.max_size).unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }

    /// The typed display-option set the formatter consumes.
    #[must_use]
    pub const fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            level: self.display.level,
            module: self.display.module,
            timestamp: self.display.timestamp,
            thread_id: self.display.thread_id,
            function: self.display.function,
            file: self.display.file,
            line: self.display.line,
            message: self.display.message,
        }
    }

    /// Expands `~` in the configured folder; an empty folder resolves to
    /// the platform state directory, falling back to the current directory.
    #[must_use]
    pub fn resolve_folder(&self) -> PathBuf {
        if self.file.folder.is_empty() {
            return directories::ProjectDirs::from("", "", "modulog").map_or_else(
                || PathBuf::from("."),
                |dirs| {
                    dirs.state_dir()
                        .unwrap_or_else(|| dirs.data_dir())
                        .to_path_buf()
                },
            );
        }
        PathBuf::from(shellexpand::tilde(&self.file.folder).as_ref())
    }
}
