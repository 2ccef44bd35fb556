use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Verbosity of the diagnostics written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const ALL: [LogLevel; 6] = [
        LogLevel::Off,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// A filter directive limiting the workspace crates to this level and everything else to
    /// warnings, e.g. `warn,kiwi_client=debug`.
    pub fn as_filter(self) -> String {
        match self {
            LogLevel::Off => "off".to_owned(),
            LogLevel::Error | LogLevel::Warn => self.as_str().to_owned(),
            level => {
                let level = level.as_str();
                format!("warn,kiwi={level},kiwi_client={level},kiwi_config={level},kiwi_tabular={level}")
            }
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let expected = Self::ALL.map(LogLevel::as_str).join(", ");
                format!(r#""{s}" is not a valid log level (expected one of {expected})"#)
            })
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rstest::rstest;

    use super::*;
    use crate::{Config, ConfigError};

    #[rstest]
    #[case("off", LogLevel::Off)]
    #[case("ERROR", LogLevel::Error)]
    #[case("Warn", LogLevel::Warn)]
    #[case("info", LogLevel::Info)]
    #[case("dEbUg", LogLevel::Debug)]
    #[case("trace", LogLevel::Trace)]
    fn parses_in_any_case(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>(), Ok(expected));
    }

    #[test]
    fn invalid_levels_list_the_valid_ones() {
        assert_eq!(
            "loud".parse::<LogLevel>(),
            Err(r#""loud" is not a valid log level (expected one of off, error, warn, info, debug, trace)"#.to_owned())
        );
    }

    #[test]
    fn configuration_values_go_through_the_same_parser() {
        assert_eq!(LogLevel::try_from("Info".to_owned()), Ok(LogLevel::Info));

        let config = Config::from_toml_str(Path::new("kiwi.toml"), r#"log_level = "TRACE""#).unwrap();
        assert_eq!(config.log_level, Some(LogLevel::Trace));

        let error = Config::from_toml_str(Path::new("kiwi.toml"), r#"log_level = "loud""#).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains("is not a valid log level"));
    }

    #[test]
    fn verbose_levels_only_apply_to_our_crates() {
        assert_eq!(LogLevel::Warn.as_filter(), "warn");
        assert_eq!(
            LogLevel::Debug.as_filter(),
            "warn,kiwi=debug,kiwi_client=debug,kiwi_config=debug,kiwi_tabular=debug"
        );
    }
}
