use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use tracing::log;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default="default_base_url")]
    pub base_url: String,

    #[serde(default="default_egress")]
    pub egress: Vec<EgressConfig>,

    #[serde(default="default_max_retries")]
    pub max_retries: u32,
    #[serde(default="default_timeout_units")]
    pub timeout_units: u64,
    #[serde(default="default_rate_limit_units")]
    pub rate_limit_units: u64,
    #[serde(default="default_time_unit_ms")]
    pub time_unit_ms: u64,

    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default="default_raw_prefix")]
    pub raw_prefix: String,

    #[serde(default="default_teams_dir")]
    pub teams_dir: String,
    #[serde(default="default_rows_dir")]
    pub rows_dir: String,
}

/// One egress point. Without a proxy the request leaves directly.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EgressConfig {
    pub region: String,
    #[serde(default)]
    pub proxy: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageConfig {
    S3 {
        bucket: String,
        region: String,
        #[serde(default)]
        endpoint: Option<String>,
    },
    Fs {
        root: String,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Fs { root: "./raw".to_string() }
    }
}

fn default_base_url() -> String {
    "https://www.fotmob.com".to_string()
}

fn default_egress() -> Vec<EgressConfig> {
    vec![EgressConfig { region: "us-east-2".to_string(), proxy: None }]
}

fn default_max_retries() -> u32 {
    3
}

fn default_timeout_units() -> u64 {
    30
}

fn default_rate_limit_units() -> u64 {
    1
}

fn default_time_unit_ms() -> u64 {
    1000
}

fn default_raw_prefix() -> String {
    "raw/json".to_string()
}

fn default_teams_dir() -> String {
    "./config/teams".to_string()
}

fn default_rows_dir() -> String {
    "./rows".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            egress: default_egress(),
            max_retries: default_max_retries(),
            timeout_units: default_timeout_units(),
            rate_limit_units: default_rate_limit_units(),
            time_unit_ms: default_time_unit_ms(),
            storage: StorageConfig::default(),
            raw_prefix: default_raw_prefix(),
            teams_dir: default_teams_dir(),
            rows_dir: default_rows_dir(),
        }
    }
}

impl Config {
    /// `n` time units as a wall clock duration.
    pub fn units(&self, n: u64) -> Duration {
        Duration::from_millis(self.time_unit_ms.saturating_mul(n))
    }

    pub fn timeout(&self) -> Duration {
        self.units(self.timeout_units)
    }

    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }
}

pub fn parse_config(data: &str) -> anyhow::Result<Config> {
    let config: Config = serde_json::from_str(data)?;
    Ok(config)
}

pub fn get_config() -> anyhow::Result<Config> {
    let path = std::env::var("CONFIG_PATH").ok()
        .unwrap_or_else(|| "./deployment/config.json".to_string());
    let data = fs::read_to_string(&path)
        .with_context(|| format!("Unable to read config at {path}"))?;
    let mut result = parse_config(&data)
        .with_context(|| format!("Could not parse JSON at {path}!"))?;
    if let Ok(base_url) = std::env::var("FOTMOB_BASE_URL") {
        result.base_url = base_url;
        log::info!("[CONFIG] FOTMOB_BASE_URL {}", result.base_url);
    }
    if let Ok(teams_dir) = std::env::var("TEAMS_DIR") {
        result.teams_dir = teams_dir;
        log::info!("[CONFIG] TEAMS_DIR {}", result.teams_dir);
    }
    log::info!("[CONFIG] {:?}", result);
    Ok(result)
}
