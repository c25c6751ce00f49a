use std::{env, time::Duration};
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl ClientConfig {
    /// Reads `READING_API_BASE` and `READING_API_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("READING_API_BASE").ok(),
            env::var("READING_API_TIMEOUT_SECS").ok(),
        )
    }

    pub fn from_values(base_url: Option<String>, timeout_secs: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base_url) = base_url.filter(|value| !value.trim().is_empty()) {
            config.base_url = base_url;
        }
        if let Some(raw) = timeout_secs {
            match raw.trim().parse::<u64>() {
                Ok(0) => config.timeout = None,
                Ok(secs) => config.timeout = Some(Duration::from_secs(secs)),
                Err(_) => warn!("ignoring invalid READING_API_TIMEOUT_SECS '{raw}'"),
            }
        }
        config.base_url = config.base_url.trim().trim_end_matches('/').to_string();
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        let config = ClientConfig::from_values(None, None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = ClientConfig::from_values(Some("http://books.local/".into()), None);
        assert_eq!(config.base_url, "http://books.local");
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config = ClientConfig::from_values(None, Some("0".into()));
        assert_eq!(config.timeout, None);

        let config = ClientConfig::from_values(None, Some("5".into()));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn bad_timeout_keeps_default() {
        let config = ClientConfig::from_values(None, Some("soon".into()));
        assert_eq!(
            config.timeout,
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        );
    }
}
