//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global: REPLACE (global defines the real baseline)
//! - Global → Local: REPLACE (scan-dir config wins over global)
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults. Environment
//! overrides have their own test binary so no test here mutates the
//! process environment.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use fstree::config::{global_config_path, local_config_path, Settings};
use fstree::errors::TreeError;

// ============================================================
// Settings::load() local config merge tests
// ============================================================

#[test]
fn given_no_local_config_when_loading_then_uses_defaults() {
    // Arrange: empty scan dir
    let scan_dir = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(Some(scan_dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_local_config_when_loading_then_replaces_defaults() {
    // Arrange
    let scan_dir = TempDir::new().unwrap();
    let local_config = "\
show_hidden = true
max_depth = 2
";
    fs::write(scan_dir.path().join(".fstree.toml"), local_config).unwrap();

    // Act
    let settings = Settings::load(Some(scan_dir.path())).expect("load settings");

    // Assert: specified fields replace, unspecified fields survive
    assert!(settings.show_hidden);
    assert_eq!(settings.max_depth, Some(2));
    assert!(settings.sort_entries);
}

#[test]
fn given_unknown_keys_in_local_config_when_loading_then_ignored() {
    // Arrange
    let scan_dir = TempDir::new().unwrap();
    let local_config = "\
sort_entries = false
future_knob = \"whatever\"
";
    fs::write(scan_dir.path().join(".fstree.toml"), local_config).unwrap();

    // Act
    let settings = Settings::load(Some(scan_dir.path())).expect("load settings");

    // Assert
    assert!(!settings.sort_entries);
}

#[test]
fn given_malformed_local_config_when_loading_then_config_error() {
    // Arrange
    let scan_dir = TempDir::new().unwrap();
    fs::write(scan_dir.path().join(".fstree.toml"), "max_depth = \"high\"\n").unwrap();

    // Act
    let result = Settings::load(Some(scan_dir.path()));

    // Assert
    match result {
        Err(TreeError::InvalidConfig(msg)) => assert!(msg.contains("parse")),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

// ============================================================
// Path helpers and TOML rendering
// ============================================================

#[test]
fn given_scan_dir_when_asking_local_config_path_then_dotfile_inside_it() {
    let path = local_config_path(Path::new("/data/scans"));
    assert_eq!(path, Path::new("/data/scans/.fstree.toml"));
}

#[test]
fn given_home_when_asking_global_config_path_then_ends_with_config_file() {
    let path = global_config_path().expect("config dir should resolve");
    assert!(path.ends_with("fstree.toml"));
}

#[test]
fn given_settings_when_rendering_toml_then_content_round_trips() {
    // Arrange
    let settings = Settings {
        show_hidden: true,
        max_depth: Some(3),
        sort_entries: false,
    };

    // Act
    let rendered = settings.to_toml().expect("render settings");
    let parsed: Settings = toml::from_str(&rendered).expect("parse rendered settings");

    // Assert
    assert_eq!(parsed, settings);
    assert!(rendered.contains("show_hidden = true"));
    assert!(rendered.contains("max_depth = 3"));
}
