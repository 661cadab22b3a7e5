use std::net::Ipv4Addr;

use serde::Deserialize;

use crate::system::Result;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind: String,
    pub resolver: Option<String>,
    pub cache_num: usize,
    pub upstream_timeout_ms: u64,
    pub mock_ttl: u32,
    pub mock_address: Ipv4Addr,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: "127.0.0.1:2053".to_string(),
            resolver: None,
            cache_num: 1000,
            upstream_timeout_ms: 2000,
            mock_ttl: 60,
            mock_address: Ipv4Addr::new(8, 8, 8, 8),
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Reads the config file when one is given, otherwise every value is defaulted.
pub async fn init_from_toml(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => {
            let text = tokio::fs::read_to_string(path).await?;
            Config::from_toml(&text)
        }
        None => Ok(Config::default()),
    }
}
