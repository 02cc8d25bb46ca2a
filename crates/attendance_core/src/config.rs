//! Runtime configuration.
//!
//! # Load order
//! 1. Compile-time defaults.
//! 2. Environment variables (`ATTENDANCE_*`).
//! 3. Explicit overrides (command-line flags).
//!
//! Each layer overrides the previous one. Empty values are ignored.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Roster file used when nothing else is configured.
pub const DEFAULT_ROSTER_FILE: &str = "students.csv";

pub const ENV_ROSTER: &str = "ATTENDANCE_ROSTER";
pub const ENV_LOG_LEVEL: &str = "ATTENDANCE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ATTENDANCE_LOG_DIR";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `origin` is the env var or flag that carried the bad value.
    InvalidValue { origin: String, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { origin, message } => write!(f, "invalid {origin}: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub roster_path: PathBuf,
    pub log_level: &'static str,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from(DEFAULT_ROSTER_FILE),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

/// Highest-priority values, typically parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub roster_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Defaults layered with the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults layered with values returned by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = non_empty(ENV_ROSTER) {
            config.roster_path = PathBuf::from(path.trim());
        }
        if let Some(level) = non_empty(ENV_LOG_LEVEL) {
            config.log_level = parse_level(ENV_LOG_LEVEL, &level)?;
        }
        if let Some(dir) = non_empty(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir.trim()));
        }
        Ok(config)
    }

    /// Applies command-line overrides on top of this configuration.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> ConfigResult<Self> {
        if let Some(path) = &overrides.roster_path {
            self.roster_path = path.clone();
        }
        if let Some(level) = &overrides.log_level {
            self.log_level = parse_level("--log-level", level)?;
        }
        if let Some(dir) = &overrides.log_dir {
            self.log_dir = Some(dir.clone());
        }
        Ok(self)
    }
}

fn parse_level(origin: &str, value: &str) -> ConfigResult<&'static str> {
    normalize_level(value).map_err(|message| ConfigError::InvalidValue {
        origin: origin.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, ConfigOverrides, ENV_LOG_LEVEL, ENV_ROSTER};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.roster_path, PathBuf::from("students.csv"));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn environment_overrides_defaults_and_ignores_blank_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_ROSTER, " class-a.csv "),
            (ENV_LOG_LEVEL, "   "),
        ]))
        .unwrap();
        assert_eq!(config.roster_path, PathBuf::from("class-a.csv"));
        assert_eq!(config.log_level, AppConfig::default().log_level);
    }

    #[test]
    fn invalid_level_names_its_origin() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        let ConfigError::InvalidValue { origin, .. } = err;
        assert_eq!(origin, ENV_LOG_LEVEL);
    }

    #[test]
    fn overrides_win_over_environment() {
        let overrides = ConfigOverrides {
            roster_path: Some(PathBuf::from("override.csv")),
            log_level: Some("warning".to_string()),
            log_dir: None,
        };
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_ROSTER, "env.csv")]))
            .unwrap()
            .with_overrides(&overrides)
            .unwrap();
        assert_eq!(config.roster_path, PathBuf::from("override.csv"));
        assert_eq!(config.log_level, "warn");
    }
}
