use std::fmt::Display;

use tracing::log;

use crate::fixture_service::FixtureService;
use crate::match_service::MatchService;
use crate::rest_client::FotmobClient;
use crate::storage::{raw_match_key, Storage};
use crate::team_config::TeamConfig;

/// Outcome of one batch. Failures carry the item and the reason.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub name: String,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    pub fn new(name: &str) -> BatchReport {
        BatchReport { name: name.to_string(), ..Default::default() }
    }

    pub fn success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    pub fn failure(&mut self, item: impl Display, reason: impl Display) {
        self.attempted += 1;
        self.failed.push((item.to_string(), reason.to_string()));
    }

    pub fn is_complete(&self) -> bool {
        self.succeeded == self.attempted
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} of {} succeeded", self.name, self.succeeded, self.attempted)
    }
}

pub struct ExtractService;

impl ExtractService {
    /// Fetches every completed match of `team` in `season` and stores the raw documents.
    pub async fn run_extraction(client: &mut FotmobClient, storage: &Storage, prefix: &str, team: &TeamConfig, season: &str) -> BatchReport {
        log::info!("[EXTRACT] Processing {} - season {season}...", team.team_name);
        let mut report = BatchReport::new(&format!("{} {season}", team.team_name));

        let Some(fixtures) = FixtureService::team_fixtures(client, &team.league_id, season, &team.team_id).await else {
            log::error!("[EXTRACT] No fixtures returned for league {} season {season}", team.league_id);
            report.failure(format!("fixtures {season}"), "no fixtures returned");
            log::info!("[EXTRACT] Completed {report}");
            return report;
        };
        let match_ids = FixtureService::completed_matches(&fixtures);

        for match_id in match_ids {
            log::info!("[EXTRACT] Fetching match {match_id}...");
            let Some(details) = MatchService::match_details(client, match_id).await else {
                log::warn!("[EXTRACT] No details returned for match {match_id}");
                report.failure(match_id, "no details returned");
                continue;
            };

            let key = raw_match_key(prefix, &team.team_name, season, match_id);
            match storage.put_raw(&key, &details).await {
                Ok(_) => report.success(),
                Err(e) => {
                    log::error!("[EXTRACT] Failed to upload {match_id}: {e}");
                    report.failure(match_id, e);
                }
            }
        }

        log::info!("[EXTRACT] Completed {report}");
        report
    }

    /// Every season of every team, one after the other.
    pub async fn run_all(client: &mut FotmobClient, storage: &Storage, prefix: &str, teams: &[TeamConfig]) -> Vec<BatchReport> {
        let mut reports = vec![];
        for team in teams {
            for season in &team.seasons {
                reports.push(ExtractService::run_extraction(client, storage, prefix, team, season).await);
            }
        }
        reports
    }
}
