pub mod client;

use std::path::{Path, PathBuf};

use baseport_core::config::{account_url, parse_config, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

use crate::prelude::*;

pub use client::BasecampClient;

/// Basecamp configuration from environment variables or the config file
#[derive(Debug, Clone)]
pub struct BasecampConfig {
    pub account_id: String,
    pub access_token: String,
    pub user_agent: String,
    pub base_url: String,
}

impl BasecampConfig {
    /// Load configuration from environment variables
    ///
    /// Returns `None` unless both BASECAMP_ACCOUNT_ID and BASECAMP_ACCESS_TOKEN
    /// are set. BASECAMP_USER_AGENT and BASECAMP_BASE_URL are optional.
    pub fn from_env() -> Option<Self> {
        let account_id = non_empty_var("BASECAMP_ACCOUNT_ID")?;
        let access_token = non_empty_var("BASECAMP_ACCESS_TOKEN")?;

        Some(Self {
            account_id,
            access_token,
            user_agent: non_empty_var("BASECAMP_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            base_url: non_empty_var("BASECAMP_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// Load configuration from a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

        let file = parse_config(&contents).map_err(|e| {
            Error::InvalidConfig(f!("{} ({})", e, path.display()))
        })?;

        Ok(Self {
            account_id: file.account_id,
            access_token: file.access_token,
            user_agent: file
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            base_url: file.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// Resolve credentials: environment first, then the config file
    ///
    /// Fails with [`Error::AuthenticationMissing`] when neither is available.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(config) = Self::from_env() {
            log::debug!("Using Basecamp credentials from the environment");
            return Ok(config);
        }

        let path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        match path {
            Some(path) if path.exists() => {
                log::debug!("Using Basecamp credentials from {}", path.display());
                Self::from_file(&path)
            }
            _ => Err(Error::AuthenticationMissing.into()),
        }
    }

    /// Account-scoped API root, e.g. `https://3.basecampapi.com/999`
    pub fn account_url(&self) -> String {
        account_url(&self.base_url, &self.account_id)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Default config file location, e.g. `~/.config/baseport/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("baseport").join("config.toml"))
}

/// Instructions shown when no credentials are configured
pub fn setup_guidance() -> String {
    let config_path = default_config_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "baseport/config.toml in your config directory".to_string());

    f!(
        "Baseport needs Basecamp 3 API credentials to work, and none were found.

Either export them in your environment:

    export BASECAMP_ACCOUNT_ID=<your account id>
    export BASECAMP_ACCESS_TOKEN=<your OAuth access token>

or write them to {config_path}:

    account_id = \"<your account id>\"
    access_token = \"<your OAuth access token>\"

Access tokens are issued through Basecamp's OAuth 2 flow.
Read more here: https://github.com/basecamp/bc3-api#authentication"
    )
}

/// Create an authenticated HTTP client with Bearer auth and the required User-Agent
pub fn create_basecamp_client(config: &BasecampConfig) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&f!("Bearer {}", config.access_token))
            .map_err(|e| eyre!("Invalid header value: {}", e))?,
    );
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent)
            .map_err(|e| eyre!("Invalid User-Agent: {}", e))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}
