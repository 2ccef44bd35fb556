//! Settings of the Kiwi dashboard: the TOML configuration file and the saved sources it
//! declares.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod config;
mod error;
mod log_level;
mod sources;

pub use config::{Config, SourceConfig, DEFAULT_CONFIG_PATH};
pub use error::{ConfigError, SourceError};
pub use log_level::LogLevel;
pub use sources::Sources;
