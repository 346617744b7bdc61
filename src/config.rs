// src/config.rs
use std::{env, path::PathBuf, time::Duration};

use tracing::warn;

pub const DEV_API_BASE: &str = "http://127.0.0.1:8080";
pub const DEFAULT_API_PORT: u16 = 8080;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub page_host: String,
    pub dev_api_base: String,
    pub api_port: u16,
    pub assets_dir: PathBuf,
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            page_host: "localhost".to_string(),
            dev_api_base: DEV_API_BASE.to_string(),
            api_port: DEFAULT_API_PORT,
            assets_dir: PathBuf::from("assets"),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ClientConfig {
    /// Reads `.env` (if any) and the `CHAT_*` environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Missing or unparsable values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            page_host: lookup("CHAT_PAGE_HOST").unwrap_or(defaults.page_host),
            dev_api_base: lookup("CHAT_DEV_API").unwrap_or(defaults.dev_api_base),
            api_port: parse_var(&lookup, "CHAT_API_PORT").unwrap_or(defaults.api_port),
            assets_dir: lookup("CHAT_ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            poll_interval: parse_var::<u64>(&lookup, "CHAT_POLL_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
        }
    }

    /// Base URL of the backend API. Local runs talk to the fixed dev host,
    /// anything else reaches the API port on the host the client was served from.
    pub fn api_host(&self) -> String {
        if self.page_host == "localhost" {
            self.dev_api_base.trim_end_matches('/').to_string()
        } else {
            format!("http://{}:{}", self.page_host, self.api_port)
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable config value");
            None
        }
    }
}
