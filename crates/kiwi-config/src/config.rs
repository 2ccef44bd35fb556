use std::{fs, io, path::Path};

use indexmap::IndexMap;
use serde::Deserialize;
use url::Url;

use crate::{ConfigError, LogLevel};

/// Read from the working directory unless another path is given.
pub const DEFAULT_CONFIG_PATH: &str = "kiwi.toml";

/// Contents of a `kiwi.toml` file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Verbosity of the diagnostics, overridden by `--log`
    pub log_level: Option<LogLevel>,
    /// Saved sources by name, in file order
    pub sources: IndexMap<String, SourceConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Base URL of the Kiwi site
    pub url: Url,
    /// Session token of a logged-in user
    pub token: Option<String>,
}

impl Config {
    pub fn from_toml_str(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        let config = Self::from_toml_str(path, &contents)?;

        tracing::debug!(path = %path.display(), sources = config.sources.len(), "loaded configuration");

        Ok(config)
    }

    /// Like [`Config::load`], but a file that does not exist reads as the default configuration.
    pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no configuration file");
                Ok(Self::default())
            }
            result => result,
        }
    }
}
