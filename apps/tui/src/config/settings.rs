use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::find_entity;

const DEFAULT_SOURCE: &str = "data";
const DEFAULT_ENTITY: &str = "us";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CONCURRENCY: usize = 1;
const MAX_CONCURRENCY: usize = 8;
const DEFAULT_LOG_FILE: &str = "leaderboard.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL or directory holding the roster CSV files
    pub roster_source: String,
    /// Entity loaded first and shown when the fleet screen opens
    pub default_entity: &'static str,
    pub fetch_timeout: Duration,
    pub fetch_concurrency: usize,
    pub log_file: PathBuf,
    pub debug: bool,
}

/// Loads `.env`, then reads the configuration from the environment.
pub fn init_app_config() -> Result<AppConfig> {
    dotenv().ok();
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let roster_source = value("ROSTER_SOURCE").unwrap_or_else(|| DEFAULT_SOURCE.to_string());

        let default_code = value("DEFAULT_ENTITY").unwrap_or_else(|| DEFAULT_ENTITY.to_string());
        let default_entity = find_entity(&default_code)
            .ok_or_else(|| eyre!("DEFAULT_ENTITY `{default_code}` is not on the leaderboard"))?
            .code;

        let timeout_secs = match value("FETCH_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    eyre!("FETCH_TIMEOUT_SECS must be a positive integer, got `{raw}`")
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let fetch_concurrency = match value("FETCH_CONCURRENCY") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|count| (1..=MAX_CONCURRENCY).contains(count))
                .ok_or_else(|| {
                    eyre!("FETCH_CONCURRENCY must be between 1 and {MAX_CONCURRENCY}, got `{raw}`")
                })?,
            None => DEFAULT_CONCURRENCY,
        };

        let log_file =
            value("LOG_FILE").map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);
        let debug = value("DEBUG").is_some_and(|flag| flag != "0" && flag != "false");

        Ok(Self {
            roster_source,
            default_entity,
            fetch_timeout: Duration::from_secs(timeout_secs),
            fetch_concurrency,
            log_file,
            debug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() -> Result<()> {
        let config = config_from(&[])?;

        assert_eq!(config.roster_source, "data");
        assert_eq!(config.default_entity, "us");
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.fetch_concurrency, 1);
        assert_eq!(config.log_file, PathBuf::from("leaderboard.log"));
        assert!(!config.debug);
        Ok(())
    }

    #[test]
    fn environment_values_override_defaults() -> Result<()> {
        let config = config_from(&[
            ("ROSTER_SOURCE", "https://example.org/data"),
            ("DEFAULT_ENTITY", "FR"),
            ("FETCH_TIMEOUT_SECS", "3"),
            ("FETCH_CONCURRENCY", "4"),
            ("DEBUG", "1"),
        ])?;

        assert_eq!(config.roster_source, "https://example.org/data");
        assert_eq!(config.default_entity, "fr");
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.fetch_concurrency, 4);
        assert!(config.debug);
        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("DEFAULT_ENTITY", "xx")]).is_err());
        assert!(config_from(&[("FETCH_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("FETCH_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("FETCH_CONCURRENCY", "64")]).is_err());
    }
}
