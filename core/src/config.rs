use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::LoadError;
use crate::escalation::EscalationPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "fieldguide.toml";
pub const DEFAULT_DATA_FILE: &str = "data.json";
pub const DEFAULT_LOCALES_DIR: &str = "locales";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Viewer configuration, merged from an optional TOML file and CLI
/// overrides. Every field has a default; a missing config file is not an
/// error.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the row table JSON.
    pub data_path: PathBuf,
    /// Directory holding `<lang>.json` translation catalogs.
    pub locales_dir: PathBuf,
    /// Language loaded at startup.
    pub language: String,
    pub policy: EscalationPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            locales_dir: PathBuf::from(DEFAULT_LOCALES_DIR),
            language: DEFAULT_LANGUAGE.to_string(),
            policy: EscalationPolicy::default(),
        }
    }
}

/// CLI-provided overrides applied on top of the file config.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub data_path: Option<PathBuf>,
    pub locales_dir: Option<PathBuf>,
    pub language: Option<String>,
    pub policy: Option<EscalationPolicy>,
}

impl Config {
    /// Load configuration. An explicit `path` must exist and parse; with no
    /// explicit path, `fieldguide.toml` in the working directory is used
    /// when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, LoadError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| LoadError::Toml { path, source })
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(data_path) = overrides.data_path {
            self.data_path = data_path;
        }
        if let Some(locales_dir) = overrides.locales_dir {
            self.locales_dir = locales_dir;
        }
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if let Some(policy) = overrides.policy {
            self.policy = policy;
        }
    }
}
