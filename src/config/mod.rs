#[cfg(feature = "cli")]
pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "https://shareous1.dexcom.com/ShareWebServices/Services";

// https://github.com/StephenBlackWasAlreadyTaken/xDrip/issues/182
pub const APPLICATION_ID: &str = "d89443d2-327c-4a6f-89e5-496bbb0317db";

pub const DEFAULT_MINUTES: u32 = 1440;
pub const DEFAULT_MAX_COUNT: u32 = 10;

/// Limits the service enforces on a readings query.
pub const MAX_MINUTES: u32 = 1440;
pub const MAX_MAX_COUNT: u32 = 288;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    pub server_url: String,
    pub application_id: String,
    pub minutes: u32,
    pub max_count: u32,
}

impl ShareConfig {
    pub fn with_server_url(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            application_id: APPLICATION_ID.to_string(),
            minutes: DEFAULT_MINUTES,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

impl ConfigProvider for ShareConfig {
    fn server_url(&self) -> &str {
        &self.server_url
    }

    fn application_id(&self) -> &str {
        &self.application_id
    }

    fn minutes(&self) -> u32 {
        self.minutes
    }

    fn max_count(&self) -> u32 {
        self.max_count
    }
}

impl Validate for ShareConfig {
    fn validate(&self) -> Result<()> {
        validate_query_settings(&self.server_url, self.minutes, self.max_count)
    }
}

pub(crate) fn validate_query_settings(
    server_url: &str,
    minutes: u32,
    max_count: u32,
) -> Result<()> {
    validate_url("server_url", server_url)?;
    validate_range("minutes", minutes, 1, MAX_MINUTES)?;
    validate_range("max_count", max_count, 1, MAX_MAX_COUNT)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_service_defaults() {
        let config = ShareConfig::default();

        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(config.application_id(), APPLICATION_ID);
        assert_eq!(config.minutes(), 1440);
        assert_eq!(config.max_count(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_max_count_is_rejected() {
        let config = ShareConfig {
            max_count: 0,
            ..ShareConfig::default()
        };

        assert!(config.validate().is_err());
    }
}
