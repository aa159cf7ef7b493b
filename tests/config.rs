//! Tests for TOML configuration loading and its typed conversions.

use modulog::{Config, FileHandling, FileTag, Level, Mode, Registry};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let config = Config::load_from(&PathBuf::from("/nonexistent/modulog.toml")).unwrap();
    assert_eq!(config.parse_level(), Level::Warning);
    assert_eq!(config.parse_mode(), Mode::OnlyFile);
    assert_eq!(config.parse_tag(), FileTag::DateTime);
    assert_eq!(config.parse_handling(), FileHandling::Split);
    assert_eq!(config.parse_max_size(), 1024 * 1024);
}

#[test]
fn empty_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("modulog.toml");
    fs::write(&path, "").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.parse_level(), Level::Warning);
    assert!(config.display_options().thread_id);
    assert!(!config.display_options().function);
}

#[test]
fn full_config_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("modulog.toml");
    fs::write(
        &path,
        r#"
[general]
level = "debug"
mode = "full"

[file]
folder = "/var/log/myapp"
name = "myapp.log"
max_size = "2K"
tag = "number"
handling = "single-tagged"

[display]
function = true
thread_id = false

[retention]
max_age_days = 14
compress = true
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.parse_level(), Level::Debug);
    assert_eq!(config.parse_mode(), Mode::Full);
    assert_eq!(config.parse_tag(), FileTag::Number);
    assert_eq!(config.parse_handling(), FileHandling::SingleTagged);
    assert_eq!(config.parse_max_size(), 2048);
    assert_eq!(config.resolve_folder(), PathBuf::from("/var/log/myapp"));
    assert_eq!(config.file.name, "myapp.log");

    let display = config.display_options();
    assert!(display.function);
    assert!(!display.thread_id);
    assert!(display.level);

    assert_eq!(config.retention.max_age_days, 14);
    assert!(config.retention.compress);
}

#[test]
fn unknown_level_string_falls_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("modulog.toml");
    fs::write(&path, "[general]\nlevel = \"loud\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.parse_level(), Level::Warning);
}

#[test]
fn invalid_toml_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("modulog.toml");
    fs::write(&path, "[general\nlevel = ").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn registry_takes_its_defaults_from_config() {
    let dir = tempdir().unwrap();
    let folder = dir.path().join("app");
    let config_path = dir.path().join("modulog.toml");
    fs::write(
        &config_path,
        format!(
            "[general]\nlevel = \"trace\"\n\n[file]\nfolder = \"{}\"\nname = \"app.log\"\n\n[display]\nlevel = false\nmodule = false\ntimestamp = false\nthread_id = false\nfile = false\nline = false\n",
            folder.display()
        ),
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();
    let registry = Registry::from_config(&config);
    assert!(registry.add_destination(modulog::Destination::new("").module("app").quiet()));

    registry.trace("app", "configured");
    registry.shutdown();

    let content = fs::read_to_string(folder.join("logs").join("app.log")).unwrap();
    assert_eq!(content, "configured\n");
}
