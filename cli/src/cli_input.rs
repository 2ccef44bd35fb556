use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use kiwi_client::EndpointConfig;
use kiwi_config::{Config, LogLevel, Sources, DEFAULT_CONFIG_PATH};
use url::Url;

use crate::errors::CliError;

/// Shown for a source given with `--url` when `--name` is not set.
pub const DEFAULT_SOURCE_NAME: &str = "Kiwi";

#[derive(Debug, Parser)]
#[command(name = "kiwi", version)]
/// Analysis dashboard for the registrations of a Kiwi activity site
pub struct Args {
    /// Path to the TOML configuration file [default: ./kiwi.toml]
    #[arg(long, short, env = "KIWI_CONFIG_PATH")]
    pub config: Option<PathBuf>,
    /// Set the logging level, overriding the configuration file and RUST_LOG
    #[arg(long = "log", env = "KIWI_LOG")]
    pub log_level: Option<LogLevel>,
    /// Name of the configured source to show
    #[arg(long, short, conflicts_with = "url")]
    pub source: Option<String>,
    /// Base URL of a Kiwi site, shown instead of the configured sources
    #[arg(long, env = "KIWI_URL")]
    pub url: Option<Url>,
    /// Session token of a logged-in user, sent with the source given by --url
    #[arg(long, env = "KIWI_SESSION_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// Label of the source given by --url
    #[arg(long)]
    pub name: Option<String>,
    /// Leave a configured source out of this session, may be repeated
    #[arg(long, value_name = "NAME")]
    pub skip: Vec<String>,
    /// Ignore the sources of the configuration file
    #[arg(long)]
    pub no_configured_sources: bool,
    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
    #[command(subcommand)]
    pub command: Option<SubCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tables and charts for the terminal
    Table,
    /// JSON on stdout, for other tools
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum SubCommand {
    /// Show registrations, registrations per activity, running totals and groups (default)
    Dashboard,
    /// List the current activities
    Activities,
    /// List the live registrations of the current activities
    Registrations(RegistrationsCommand),
    /// List the groups of the logged-in user
    Relations,
    /// List the registrations of the logged-in user
    MyRegistrations,
    /// List all groups
    Groups,
    /// Show whether the logged-in user is an administrator
    Admin,
    /// List the configured sources
    Sources,
}

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct RegistrationsCommand {
    /// Add a running count of the registrations per activity, ordered by creation time
    #[arg(long)]
    pub cumulative: bool,
}

impl Args {
    pub fn command(&self) -> SubCommand {
        self.command.clone().unwrap_or(SubCommand::Dashboard)
    }

    /// Loads the configuration file. Only a file passed explicitly has to exist.
    pub fn config(&self) -> Result<Config, CliError> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_optional(Path::new(DEFAULT_CONFIG_PATH))?,
        };

        Ok(config)
    }

    /// The log level from the command line, then from the configuration file.
    pub fn log_level(&self, config: &Config) -> Option<LogLevel> {
        self.log_level.or(config.log_level)
    }

    /// The configured sources, minus the skipped ones, plus the one given by `--url`, replacing a
    /// configured source with the same name.
    pub fn sources(&self, config: &Config) -> Sources {
        let mut sources = Sources::from(config);

        if self.no_configured_sources {
            sources.clear();
        }

        for name in &self.skip {
            if sources.remove(name).is_none() {
                tracing::warn!(source = %name, "skipped source is not configured");
            }
        }

        if let Some(url) = &self.url {
            sources.add(EndpointConfig::new(self.source_name(), url.clone(), self.token.clone()));
        }

        sources
    }

    /// Picks the source to show from `sources`.
    pub fn select<'a>(&self, sources: &'a Sources) -> Result<&'a EndpointConfig, CliError> {
        let name = match self.url {
            Some(_) => Some(self.source_name()),
            None => self.source.as_deref(),
        };

        sources.select(name)?.ok_or(CliError::NoSource)
    }

    fn source_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_SOURCE_NAME)
    }
}
