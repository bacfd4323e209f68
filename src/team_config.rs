use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::log;
use walkdir::WalkDir;

use crate::models::StringOrNum;

/// Per-team extraction job, one JSON document per team.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamConfig {
    pub team_id: StringOrNum,
    pub team_name: String,
    pub league_id: StringOrNum,
    #[serde(default)]
    pub seasons: Vec<String>,
}

impl TeamConfig {
    pub fn load(path: &Path) -> anyhow::Result<TeamConfig> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read team config {}", path.display()))?;
        let config = serde_json::from_str(&data)
            .with_context(|| format!("Could not parse team config {}", path.display()))?;
        Ok(config)
    }

    /// Every `*.json` under `dir`, ordered by path.
    pub fn load_all(dir: &Path) -> anyhow::Result<Vec<TeamConfig>> {
        let mut paths: Vec<_> = WalkDir::new(dir).into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().map(|e| e == "json").unwrap_or(false))
            .collect();
        paths.sort();

        let configs = paths.iter()
            .map(|p| TeamConfig::load(p))
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::info!("[CONFIG] Loaded {} team configs from {}", configs.len(), dir.display());
        Ok(configs)
    }
}
