//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/fstree/fstree.toml`
//! 3. Local config: `<scan_dir>/.fstree.toml`
//! 4. Environment variables: `FSTREE_*` prefix
//!
//! All fields are scalars, so every layer simply replaces the values the
//! previous one produced. CLI flags are applied on top by the command
//! layer and win over everything here.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{TreeError, TreeResult};

/// Unified configuration for fstree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Mirror hidden entries (leading dot) when scanning a directory
    pub show_hidden: bool,
    /// Levels to mirror below the scan root, None for unlimited
    pub max_depth: Option<usize>,
    /// Sort directory entries by file name for deterministic insertion order
    pub sort_entries: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hidden: false,
            max_depth: None,
            sort_entries: true,
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect
/// "not specified", which inherits the value from the layer below).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub show_hidden: Option<bool>,
    pub max_depth: Option<usize>,
    pub sort_entries: Option<bool>,
}

/// Get the XDG config directory for fstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("fstree.toml"))
}

/// Get the path to the local config file in a scan directory.
pub fn local_config_path(scan_dir: &Path) -> PathBuf {
    scan_dir.join(".fstree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> TreeResult<RawSettings> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TreeError::InvalidConfig(format!("read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| TreeError::InvalidConfig(format!("parse {}: {}", path.display(), e)))
}

/// Distinguishes "variable not set" (inherit the layer below) from a value
/// that is set but unparseable, which fails as loudly as a malformed file.
fn env_override<T>(lookup: Result<T, ConfigError>, var: &str) -> TreeResult<Option<T>> {
    match lookup {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(TreeError::InvalidConfig(format!("{var}: {e}"))),
    }
}

impl Settings {
    /// Overlay raw settings onto self: specified fields replace, the rest
    /// keep their current value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            show_hidden: overlay.show_hidden.unwrap_or(self.show_hidden),
            max_depth: overlay.max_depth.or(self.max_depth),
            sort_entries: overlay.sort_entries.unwrap_or(self.sort_entries),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `scan_dir` - Optional directory whose `.fstree.toml` supplies the
    ///   local layer
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/fstree/fstree.toml`
    /// 3. Local config: `<scan_dir>/.fstree.toml`
    /// 4. Environment variables: `FSTREE_*` prefix
    pub fn load(scan_dir: Option<&Path>) -> TreeResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = scan_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply FSTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> TreeResult<Self> {
        let builder = Config::builder().add_source(Environment::with_prefix("FSTREE"));
        let config = builder
            .build()
            .map_err(|e| TreeError::InvalidConfig(e.to_string()))?;

        if let Some(val) = env_override(config.get_bool("show_hidden"), "FSTREE_SHOW_HIDDEN")? {
            settings.show_hidden = val;
        }
        if let Some(val) = env_override(config.get_int("max_depth"), "FSTREE_MAX_DEPTH")? {
            // Negative depths cannot be a usize and are ignored
            if let Ok(depth) = usize::try_from(val) {
                settings.max_depth = Some(depth);
            }
        }
        if let Some(val) = env_override(config.get_bool("sort_entries"), "FSTREE_SORT_ENTRIES")? {
            settings.sort_entries = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> TreeResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TreeError::InvalidConfig(format!("serialize config: {e}")))
    }
}
