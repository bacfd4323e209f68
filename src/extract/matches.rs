use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::nested::Nested;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub match_id: Option<i64>,
    pub match_name: Option<String>,
    pub match_round: Option<String>,
    pub match_time_utc: Option<DateTime<Utc>>,
    pub league_id: Option<i64>,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub home_formation: Option<String>,
    pub away_formation: Option<String>,
    pub home_lineup: Vec<i64>,
    pub away_lineup: Vec<i64>,
}

fn kickoff(general: &Value) -> Option<DateTime<Utc>> {
    general.at("matchTimeUTCDate").as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
}

/// Starter ids in the order the API lists them.
fn starter_ids(team: &Value) -> Vec<i64> {
    team.at("starters").items().iter()
        .filter_map(|p| p.at("id").i64_val())
        .collect()
}

pub fn matches(doc: &Value) -> Vec<MatchRow> {
    let general = doc.at("general");
    let teams = doc.at("header").at("teams");
    let lineup = doc.at("content").at("lineup");
    let home = lineup.at("homeTeam");
    let away = lineup.at("awayTeam");

    vec![MatchRow {
        match_id: general.at("matchId").i64_val(),
        match_name: general.at("matchName").str_val(),
        match_round: general.at("matchRound").text(),
        match_time_utc: kickoff(general),
        league_id: general.at("leagueId").i64_val(),
        home_team_id: general.at("homeTeam").at("id").i64_val(),
        away_team_id: general.at("awayTeam").at("id").i64_val(),
        home_score: teams.idx(0).at("score").i64_val(),
        away_score: teams.idx(1).at("score").i64_val(),
        home_formation: home.at("formation").str_val(),
        away_formation: away.at("formation").str_val(),
        home_lineup: starter_ids(home),
        away_lineup: starter_ids(away),
    }]
}
