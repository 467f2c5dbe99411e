//! Startup configuration
//!
//! The bearer credential is resolved exactly once, before any request is
//! served, and handed to the fetcher through [`Config`].

use std::fmt;
use std::time::Duration;

use crate::{Error, Result};

/// Environment variable holding the bearer credential
pub const API_KEY_ENV: &str = "SEARCH_INTENT_API_KEY";

/// Environment variable overriding the endpoint URL
pub const API_URL_ENV: &str = "SEARCH_INTENT_API_URL";

/// Environment variable overriding the outbound request timeout
pub const TIMEOUT_ENV: &str = "SEARCH_INTENT_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "https://aisearchintent.com/api/search-intent";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved server configuration
#[derive(Clone)]
pub struct Config {
    api_key: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Build a validated configuration.
    ///
    /// A missing or blank `api_key` is a [`Error::MissingApiKey`]; the server
    /// must not start without one. A usable key is stored byte for byte.
    pub fn new(
        api_key: Option<String>,
        api_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::MissingApiKey)?;

        let api_url = api_url.into();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "API URL must be http(s), got '{}'",
                api_url
            )));
        }

        if timeout_secs == 0 {
            return Err(Error::Config(
                "timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The bearer credential
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
