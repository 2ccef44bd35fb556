use std::io;

use kiwi_client::{Error as ClientError, SchemaError};
use kiwi_config::{ConfigError, SourceError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// wraps an error reading the configuration file
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// wraps an error picking the source to show
    #[error(transparent)]
    Source(#[from] SourceError),
    /// wraps an error talking to the Kiwi site
    #[error(transparent)]
    Client(#[from] ClientError),
    /// returned if no source is configured and none was given on the command line
    #[error("there is no source to show")]
    NoSource,
    /// returned if the async runtime could not be started
    #[error("could not start the async runtime\nCaused by: {0}")]
    Runtime(#[source] io::Error),
    /// returned if the output could not be written
    #[error("could not write the output\nCaused by: {0}")]
    Output(#[from] io::Error),
    /// returned if the output could not be serialized to JSON
    #[error("could not serialize the output\nCaused by: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// returns the appropriate hint for a [`CliError`]
    pub fn to_hint(&self) -> Option<String> {
        match self {
            Self::NoSource => Some("add a [sources.<name>] entry with a url to kiwi.toml, or pass --url".to_owned()),
            Self::Source(SourceError::Ambiguous(_)) => Some("pick a source with --source <name>".to_owned()),
            Self::Source(SourceError::Unknown(_)) => Some("run 'kiwi sources' to list the configured sources".to_owned()),
            Self::Config(ConfigError::Parse { .. }) => Some("the file may only set 'log_level' and [sources.<name>] tables with a 'url' and an optional 'token'".to_owned()),
            Self::Client(ClientError::Unauthorized { .. }) => Some("pass a session token with --token or set 'token' for the source in kiwi.toml".to_owned()),
            Self::Client(ClientError::Transport(_)) => Some("check the URL of the source and your network connection".to_owned()),
            Self::Client(ClientError::HttpStatus { status, .. }) if status.as_u16() == 404 => Some("the URL should point to the root of the Kiwi site, without '/api/graphql/'".to_owned()),
            Self::Client(ClientError::Schema(SchemaError::UnknownField { .. } | SchemaError::UnknownType(_))) => Some("the Kiwi site may run a version this dashboard does not support".to_owned()),
            Self::Client(ClientError::Graphql(_)) => Some("the session token may have expired, log in again and copy the new KIWI_PHPSESSID cookie".to_owned()),
            Self::Client(ClientError::InvalidCredential) => Some("copy the value of the KIWI_PHPSESSID cookie without quotes or spaces".to_owned()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_errors_hint_at_the_token() {
        let error = CliError::from(ClientError::Unauthorized { operation: "groups" });

        assert!(error.to_hint().is_some_and(|hint| hint.contains("--token")));
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let error = CliError::from(SourceError::Unknown("archive".to_owned()));

        assert_eq!(error.to_string(), "no source named 'archive' is configured");
    }

    #[test]
    fn output_errors_have_no_hint() {
        let error = CliError::Output(io::Error::other("broken pipe"));

        assert_eq!(error.to_hint(), None);
    }
}
