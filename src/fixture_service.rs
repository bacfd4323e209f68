use serde_json::Value;
use tracing::log;

use crate::extract::Nested;
use crate::models::StringOrNum;
use crate::models_external::fixture::Fixture;
use crate::rest_client::FotmobClient;

pub struct FixtureService;

impl FixtureService {
    /// `None` only when the request failed; a league without fixtures is `Some(vec![])`.
    pub async fn league_fixtures(client: &mut FotmobClient, league_id: &StringOrNum, season: &str) -> Option<Vec<Fixture>> {
        let params = [("id", league_id.to_str()), ("season", season.to_string())];
        client.request("leagues", &params).await
            .map(|rsp| FixtureService::parse_fixtures(&rsp))
    }

    pub async fn team_fixtures(client: &mut FotmobClient, league_id: &StringOrNum, season: &str, team_id: &StringOrNum) -> Option<Vec<Fixture>> {
        let fixtures = FixtureService::league_fixtures(client, league_id, season).await?;
        let team_fixtures = FixtureService::filter_team(fixtures, team_id);
        log::info!("[FIXTURES] Found {} matches for team {team_id}", team_fixtures.len());
        Some(team_fixtures)
    }

    /// Ids of finished fixtures, in schedule order.
    pub fn completed_matches(fixtures: &[Fixture]) -> Vec<i64> {
        let completed: Vec<i64> = fixtures.iter()
            .filter(|f| f.is_finished())
            .filter_map(|f| {
                let id = f.id.to_num();
                if id.is_none() {
                    log::warn!("[FIXTURES] Skipping fixture with non numeric id {}", f.id);
                }
                id
            })
            .collect();
        log::info!("[FIXTURES] Found {} completed matches out of {} total", completed.len(), fixtures.len());
        completed
    }

    pub fn filter_team(fixtures: Vec<Fixture>, team_id: &StringOrNum) -> Vec<Fixture> {
        fixtures.into_iter()
            .filter(|f| f.involves(team_id))
            .collect()
    }

    /// `fixtures.allMatches`, each entry decoded on its own.
    pub fn parse_fixtures(rsp: &Value) -> Vec<Fixture> {
        rsp.at("fixtures").at("allMatches").items().iter()
            .filter_map(|e| match serde_json::from_value::<Fixture>(e.clone()) {
                Ok(f) => Some(f),
                Err(err) => {
                    log::warn!("[FIXTURES] Skipping undecodable fixture: {err}");
                    None
                }
            })
            .collect()
    }
}
