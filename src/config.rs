use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HISTORY_FILE: &str = "moodmix_history.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub jamendo_client_id: Option<String>,
    pub request_timeout: Duration,
    pub history_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            jamendo_client_id: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let request_timeout = match var("MOODMIX_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AppError::Config(format!("MOODMIX_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                if secs == 0 {
                    return Err(AppError::Config(
                        "MOODMIX_TIMEOUT_SECS must be greater than zero".into(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            gemini_api_key: var("GEMINI_API_KEY"),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            jamendo_client_id: var("JAMENDO_CLIENT_ID"),
            request_timeout,
            history_file: var("MOODMIX_HISTORY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE)),
        })
    }

    pub fn get_missing_config(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if self.gemini_api_key.is_none() {
            missing.push("GEMINI_API_KEY".to_string());
        }
        if self.jamendo_client_id.is_none() {
            missing.push("JAMENDO_CLIENT_ID".to_string());
        }

        missing
    }

    pub fn validate_jamendo_config(&self) -> bool {
        self.jamendo_client_id.is_some()
    }

    pub fn validate_gemini_config(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.history_file, PathBuf::from(DEFAULT_HISTORY_FILE));
        assert_eq!(
            config.get_missing_config(),
            vec!["GEMINI_API_KEY".to_string(), "JAMENDO_CLIENT_ID".to_string()]
        );
    }

    #[test]
    fn test_reads_credentials_and_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "g-key"),
            ("JAMENDO_CLIENT_ID", "abc123"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("MOODMIX_TIMEOUT_SECS", "3"),
            ("MOODMIX_HISTORY_FILE", "/tmp/history.json"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(config.jamendo_client_id.as_deref(), Some("abc123"));
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert!(config.get_missing_config().is_empty());
        assert!(config.validate_gemini_config());
        assert!(config.validate_jamendo_config());
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "   ")])).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert!(!config.validate_gemini_config());
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("MOODMIX_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = Config::from_lookup(lookup_from(&[("MOODMIX_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
