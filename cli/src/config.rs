use std::path::{Path, PathBuf};

use md2struct::{Compatibility, ParseOptions, Recovery};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "md2struct.toml";
pub const DEFAULT_INPUT: &str = "input.md";
pub const DEFAULT_OUTPUT: &str = "output.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {config_path} does not exist")]
    NotFound { config_path: PathBuf },

    #[error("failed to read config file {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Conversion settings from `md2struct.toml`. Command-line flags take
/// precedence over every field.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub pretty: bool,
    #[serde(default)]
    pub compatibility: Compatibility,
    #[serde(default)]
    pub on_malformed: Recovery,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        log::debug!("loaded settings from {}", config_path.display());
        Ok(Some(config))
    }

    /// Load `explicit` if given (it must exist), else `md2struct.toml` in the
    /// working directory if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path)?.ok_or_else(|| ConfigError::NotFound {
                config_path: path.to_path_buf(),
            }),
            None => Ok(Self::load_from_path(DEFAULT_CONFIG_FILE)?.unwrap_or_default()),
        }
    }

    pub fn input(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            compatibility: self.compatibility,
            recovery: self.on_malformed,
        }
    }
}
