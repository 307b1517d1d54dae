//! Runtime configuration assembled from environment variables.
//!
//! | Variable                      | Meaning                                  |
//! |-------------------------------|------------------------------------------|
//! | `VILLAGE_LOG_LEVEL`           | trace, debug, info, warn or error        |
//! | `VILLAGE_LOG_DIR`             | absolute log directory; unset = no file logging |
//! | `VILLAGE_GOOGLE_CLIENT_ID`    | application credential; unset = sync disabled |
//! | `VILLAGE_GOOGLE_ACCESS_TOKEN` | OAuth token with the calendar events scope |
//! | `VILLAGE_GOOGLE_CALENDAR_ID`  | target calendar, default `primary`       |
//! | `VILLAGE_GOOGLE_API_BASE`     | API root, default Google Calendar v3     |
//! | `VILLAGE_GOOGLE_TIME_ZONE`    | IANA zone label sent with each event     |

use crate::logging::{default_log_level, LoggingConfig, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const ENV_LOG_LEVEL: &str = "VILLAGE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "VILLAGE_LOG_DIR";
pub const ENV_GOOGLE_CLIENT_ID: &str = "VILLAGE_GOOGLE_CLIENT_ID";
pub const ENV_GOOGLE_ACCESS_TOKEN: &str = "VILLAGE_GOOGLE_ACCESS_TOKEN";
pub const ENV_GOOGLE_CALENDAR_ID: &str = "VILLAGE_GOOGLE_CALENDAR_ID";
pub const ENV_GOOGLE_API_BASE: &str = "VILLAGE_GOOGLE_API_BASE";
pub const ENV_GOOGLE_TIME_ZONE: &str = "VILLAGE_GOOGLE_TIME_ZONE";

pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_GOOGLE_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Settings for the Google Calendar provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleCalendarConfig {
    /// Empty means the integration is not configured.
    pub client_id: String,
    pub access_token: Option<String>,
    pub calendar_id: String,
    pub api_base: String,
    pub time_zone: Option<String>,
}

impl Default for GoogleCalendarConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            access_token: None,
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            api_base: DEFAULT_GOOGLE_API_BASE.to_string(),
            time_zone: None,
        }
    }
}

impl GoogleCalendarConfig {
    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HubConfig {
    /// `None` when no log directory is configured.
    pub logging: Option<LoggingConfig>,
    pub google: GoogleCalendarConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Logging { variable: &'static str, source: LoggingError },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging { variable, source } => write!(f, "{variable}: {source}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging { source, .. } => Some(source),
        }
    }
}

impl HubConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let logging = match read(ENV_LOG_DIR) {
            Some(log_dir) => {
                let level = read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());
                let config = LoggingConfig::new(&level, &log_dir).map_err(|source| {
                    let variable = match source {
                        LoggingError::UnsupportedLevel(_) => ENV_LOG_LEVEL,
                        _ => ENV_LOG_DIR,
                    };
                    ConfigError::Logging { variable, source }
                })?;
                Some(config)
            }
            None => None,
        };

        let defaults = GoogleCalendarConfig::default();
        let google = GoogleCalendarConfig {
            client_id: read(ENV_GOOGLE_CLIENT_ID).unwrap_or_default(),
            access_token: read(ENV_GOOGLE_ACCESS_TOKEN),
            calendar_id: read(ENV_GOOGLE_CALENDAR_ID).unwrap_or(defaults.calendar_id),
            api_base: read(ENV_GOOGLE_API_BASE).unwrap_or(defaults.api_base),
            time_zone: read(ENV_GOOGLE_TIME_ZONE),
        };

        Ok(Self { logging, google })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, HubConfig, DEFAULT_CALENDAR_ID, ENV_LOG_LEVEL};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_disables_logging_and_sync() {
        let config = HubConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.logging.is_none());
        assert!(!config.google.is_configured());
        assert_eq!(config.google.calendar_id, DEFAULT_CALENDAR_ID);
    }

    #[test]
    fn reads_google_settings_and_treats_blank_as_unset() {
        let config = HubConfig::from_lookup(lookup(&[
            ("VILLAGE_GOOGLE_CLIENT_ID", " abc.apps.googleusercontent.com "),
            ("VILLAGE_GOOGLE_ACCESS_TOKEN", "   "),
            ("VILLAGE_GOOGLE_CALENDAR_ID", "family@example.com"),
        ]))
        .unwrap();
        assert!(config.google.is_configured());
        assert_eq!(config.google.client_id, "abc.apps.googleusercontent.com");
        assert_eq!(config.google.access_token, None);
        assert_eq!(config.google.calendar_id, "family@example.com");
    }

    #[test]
    fn invalid_log_level_names_the_variable() {
        let err = HubConfig::from_lookup(lookup(&[
            ("VILLAGE_LOG_DIR", "/tmp/village-logs"),
            ("VILLAGE_LOG_LEVEL", "chatty"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Logging {
                variable: ENV_LOG_LEVEL,
                ..
            }
        ));
    }
}
