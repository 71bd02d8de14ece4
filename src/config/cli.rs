use crate::config::{validate_query_settings, APPLICATION_ID, DEFAULT_SERVER_URL};
use crate::core::ConfigProvider;
use crate::domain::model::Credentials;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::fmt;

#[derive(Clone, Parser)]
#[command(about = "Read the latest glucose values from Dexcom Share")]
pub struct CliConfig {
    /// Dexcom account username
    #[arg(allow_hyphen_values = true)]
    pub username: String,

    /// Dexcom account password
    #[arg(allow_hyphen_values = true)]
    pub password: String,

    /// Share web services base URL
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Lookback window in minutes
    #[arg(long, default_value = "1440")]
    pub minutes: u32,

    /// Maximum number of readings to return
    #[arg(long, default_value = "10")]
    pub max_count: u32,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("server_url", &self.server_url)
            .field("minutes", &self.minutes)
            .field("max_count", &self.max_count)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl ConfigProvider for CliConfig {
    fn server_url(&self) -> &str {
        &self.server_url
    }

    fn application_id(&self) -> &str {
        APPLICATION_ID
    }

    fn minutes(&self) -> u32 {
        self.minutes
    }

    fn max_count(&self) -> u32 {
        self.max_count
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_query_settings(&self.server_url, self.minutes, self.max_count)
    }
}
