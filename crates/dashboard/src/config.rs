//! Runtime configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_RELOAD_DELAY_MS: u64 = 1500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("no data directory available; set AFIYA_STORAGE_PATH")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_url: String,
    pub storage_path: PathBuf,
    pub poll_interval: Duration,
    /// Pause between a detected session expiry and the forced return to login.
    pub reload_delay: Duration,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_empty("AFIYA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let storage_path = match non_empty("AFIYA_STORAGE_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_storage_path().ok_or(ConfigError::NoDataDir)?,
        };

        let poll_secs = parse_u64(
            "AFIYA_POLL_INTERVAL_SECS",
            non_empty("AFIYA_POLL_INTERVAL_SECS"),
            DEFAULT_POLL_INTERVAL_SECS,
        )?;
        if poll_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "AFIYA_POLL_INTERVAL_SECS",
                value: "0".to_string(),
            });
        }

        let reload_ms = parse_u64(
            "AFIYA_RELOAD_DELAY_MS",
            non_empty("AFIYA_RELOAD_DELAY_MS"),
            DEFAULT_RELOAD_DELAY_MS,
        )?;

        Ok(Self {
            api_url,
            storage_path,
            poll_interval: Duration::from_secs(poll_secs),
            reload_delay: Duration::from_millis(reload_ms),
            admin_email: non_empty("AFIYA_ADMIN_EMAIL"),
            admin_password: non_empty("AFIYA_ADMIN_PASSWORD"),
        })
    }
}

fn parse_u64(key: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// `<data_dir>/afiya-admin/storage.db`
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("afiya-admin").join("storage.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config =
            DashboardConfig::from_lookup(lookup(&[("AFIYA_STORAGE_PATH", "/tmp/afiya.db")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.reload_delay, Duration::from_millis(1500));
        assert_eq!(config.storage_path, PathBuf::from("/tmp/afiya.db"));
        assert_eq!(config.admin_email, None);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("AFIYA_STORAGE_PATH", "/tmp/afiya.db"),
            ("AFIYA_API_URL", "https://api.afiyazone.com/api"),
            ("AFIYA_POLL_INTERVAL_SECS", "5"),
            ("AFIYA_RELOAD_DELAY_MS", "0"),
            ("AFIYA_ADMIN_EMAIL", "ops@afiyazone.com"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://api.afiyazone.com/api");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.reload_delay, Duration::ZERO);
        assert_eq!(config.admin_email.as_deref(), Some("ops@afiyazone.com"));
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        let err = DashboardConfig::from_lookup(lookup(&[
            ("AFIYA_STORAGE_PATH", "/tmp/afiya.db"),
            ("AFIYA_POLL_INTERVAL_SECS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "AFIYA_POLL_INTERVAL_SECS",
                value: "soon".to_string()
            }
        );

        let err = DashboardConfig::from_lookup(lookup(&[
            ("AFIYA_STORAGE_PATH", "/tmp/afiya.db"),
            ("AFIYA_POLL_INTERVAL_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
