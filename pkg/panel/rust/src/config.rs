// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LOG_LIMIT: u32 = 100;
pub const MAX_LOG_LIMIT: u32 = 1000;
pub const DEFAULT_RECENT_ALERT_LIMIT: usize = 5;

/// Client settings, assembled from CLI flags and their environment fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub api_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub log_limit: u32,
    pub recent_alert_limit: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_limit: DEFAULT_LOG_LIMIT,
            recent_alert_limit: DEFAULT_RECENT_ALERT_LIMIT,
        }
    }
}

impl PanelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme(url.to_string()));
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if !(1..=MAX_LOG_LIMIT).contains(&self.log_limit) {
            return Err(ConfigError::LogLimitOutOfRange(self.log_limit));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PanelConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.log_limit, 100);
        assert_eq!(config.recent_alert_limit, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = PanelConfig::default();

        let config = PanelConfig {
            api_url: "  ".into(),
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyApiUrl));

        let config = PanelConfig {
            api_url: "ftp://backend".into(),
            ..base.clone()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedScheme("ftp://backend".into()))
        );

        let config = PanelConfig {
            poll_interval: Duration::ZERO,
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval));

        let config = PanelConfig {
            request_timeout: Duration::ZERO,
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        let config = PanelConfig {
            log_limit: 5000,
            ..base
        };
        assert_eq!(config.validate(), Err(ConfigError::LogLimitOutOfRange(5000)));
    }
}
