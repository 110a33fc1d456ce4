//! Basecamp credentials file parsing
//!
//! The config file is TOML:
//!
//! ```toml
//! account_id = "999999999"
//! access_token = "BAhbB0kiAbB7ImNsaWVudF9pZCI6..."
//! user_agent = "Baseport (you@example.com)"   # optional
//! base_url = "https://3.basecampapi.com"      # optional
//! ```

use serde::Deserialize;

/// Default Basecamp 3 API host
pub const DEFAULT_BASE_URL: &str = "https://3.basecampapi.com";

/// Default `User-Agent`; Basecamp rejects requests without one
pub const DEFAULT_USER_AGENT: &str = "Baseport (https://github.com/baseport/baseport)";

/// Error type for config parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config value `{0}` must not be empty")]
    Empty(&'static str),
}

/// Raw contents of a config file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ConfigFile {
    pub account_id: String,
    pub access_token: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Parse and validate a config file's contents
pub fn parse_config(contents: &str) -> Result<ConfigFile, ConfigError> {
    let config: ConfigFile = toml::from_str(contents)?;

    if config.account_id.trim().is_empty() {
        return Err(ConfigError::Empty("account_id"));
    }
    if config.access_token.trim().is_empty() {
        return Err(ConfigError::Empty("access_token"));
    }

    Ok(config)
}

/// Base URL of an account's API, e.g. `https://3.basecampapi.com/999`
pub fn account_url(base_url: &str, account_id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), account_id)
}
