use std::path::Path;

use serde::Serialize;
use tracing::log;

use crate::extract::{MatchRows, StatRow};
use crate::extract_service::BatchReport;
use crate::models::Period;
use crate::storage::{match_id_from_key, Storage};
use crate::LogResult;

#[derive(Serialize)]
struct PeriodStatRow<'a> {
    period: Period,
    #[serde(flatten)]
    row: &'a StatRow,
}

/// Newline delimited JSON, one buffer per output table.
#[derive(Default)]
struct Tables {
    teams: String,
    leagues: String,
    players: String,
    matches: String,
    stats: String,
}

fn push_rows<T: Serialize>(buffer: &mut String, rows: impl IntoIterator<Item = T>) -> serde_json::Result<()> {
    for row in rows {
        buffer.push_str(&serde_json::to_string(&row)?);
        buffer.push('\n');
    }
    Ok(())
}

impl Tables {
    fn push(&mut self, rows: &MatchRows) -> serde_json::Result<()> {
        push_rows(&mut self.teams, &rows.teams)?;
        push_rows(&mut self.leagues, &rows.leagues)?;
        push_rows(&mut self.players, &rows.players)?;
        push_rows(&mut self.matches, &rows.matches)?;
        push_rows(&mut self.stats, rows.stats.iter().map(|(period, row)| PeriodStatRow { period: *period, row }))
    }

    async fn write(&self, out_dir: &Path) -> std::io::Result<()> {
        tokio::fs::create_dir_all(out_dir).await?;
        for (name, data) in [
            ("dim_teams", &self.teams),
            ("dim_leagues", &self.leagues),
            ("dim_players", &self.players),
            ("fact_matches", &self.matches),
            ("fact_stats", &self.stats),
        ] {
            tokio::fs::write(out_dir.join(format!("{name}.jsonl")), data).await?;
        }
        Ok(())
    }
}

pub struct TransformService;

impl TransformService {
    /// Flattens every raw match document under `prefix` into table files in `out_dir`.
    pub async fn run_transform(storage: &Storage, prefix: &str, out_dir: &Path) -> anyhow::Result<BatchReport> {
        let mut report = BatchReport::new(&format!("transform {prefix}"));
        let mut tables = Tables::default();

        let keys = storage.list_raw(prefix).await?;
        log::info!("[TRANSFORM] Found {} documents under {prefix}", keys.len());

        for key in keys {
            let Some(doc) = storage.get_raw(&key).await.ok_log("[TRANSFORM] Read failed") else {
                report.failure(&key, "unreadable document");
                continue;
            };
            let Some(match_id) = MatchRows::document_match_id(&doc).or_else(|| match_id_from_key(&key)) else {
                log::warn!("[TRANSFORM] No match id in document or key {key}");
                report.failure(&key, "no match id");
                continue;
            };
            let rows = MatchRows::from_document(&doc, match_id);
            match tables.push(&rows) {
                Ok(_) => report.success(),
                Err(e) => {
                    log::error!("[TRANSFORM] Encode failed {key}: {e}");
                    report.failure(&key, e);
                }
            }
        }

        tables.write(out_dir).await?;
        log::info!("[TRANSFORM] Completed {report}, tables in {}", out_dir.display());
        Ok(report)
    }
}
