use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// returned if the configuration file could not be read
    #[error("could not read the configuration file {}\nCaused by: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// returned if the configuration file is not valid TOML or has unknown settings
    #[error("could not parse the configuration file {}\nCaused by: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SourceError {
    /// returned if several sources are saved and none was named
    #[error("several sources are configured, pick one of: {}", .0.join(", "))]
    Ambiguous(Vec<String>),

    /// returned if the named source is not saved
    #[error("no source named '{0}' is configured")]
    Unknown(String),
}
