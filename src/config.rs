//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/taxtree/taxtree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `TAXTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for taxtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Insert the built-in example species at startup
    pub seed_examples: bool,
    /// Ask for confirmation before deleting a species
    pub confirm_delete: bool,
    /// Command used to open reference links (default: platform opener)
    pub browser: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed_examples: true,
            confirm_delete: true,
            browser: None,
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub seed_examples: Option<bool>,
    pub confirm_delete: Option<bool>,
    pub browser: Option<String>,
}

/// Get the XDG config directory for taxtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "taxtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("taxtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            seed_examples: overlay.seed_examples.unwrap_or(self.seed_examples),
            confirm_delete: overlay.confirm_delete.unwrap_or(self.confirm_delete),
            browser: overlay.browser.clone().or_else(|| self.browser.clone()),
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the browser command.
    fn expand_paths(&mut self) {
        if let Some(browser) = self.browser.as_mut() {
            if let Ok(expanded) = shellexpand::full(browser.as_str()) {
                *browser = expanded.into_owned();
            }
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let global_path = global_config_path().filter(|path| path.exists());
        Self::load_layered(global_path.as_deref(), config_file)
    }

    /// Merge defaults, `global_file`, `config_file` and the environment, in that order.
    ///
    /// Both files are optional layers, but a file that is given must exist.
    pub fn load_layered(
        global_file: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();
        for path in [global_file, config_file].into_iter().flatten() {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply TAXTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TAXTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("seed_examples") {
            settings.seed_examples = val;
        }
        if let Ok(val) = config.get_bool("confirm_delete") {
            settings.confirm_delete = val;
        }
        if let Ok(val) = config.get_string("browser") {
            settings.browser = Some(val);
        }

        Ok(settings)
    }

    /// Render as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
