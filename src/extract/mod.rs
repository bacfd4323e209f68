//! Flattens one FotMob match document into dimension and fact rows.
//!
//! Every transform is a pure function of the document. Missing or oddly
//! shaped levels give `None` fields (or fewer rows), never an error.

pub mod nested;
mod matches;
mod players;
mod stats;
mod teams;

use serde_json::Value;

use crate::models::Period;

pub use matches::{matches, MatchRow};
pub use nested::Nested;
pub use players::{players, PlayerRow};
pub use stats::{stats, StatRow};
pub use teams::{leagues, teams, LeagueRow, TeamRow};

/// All row sets of one match, stats covering every period.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRows {
    pub teams: Vec<TeamRow>,
    pub leagues: Vec<LeagueRow>,
    pub players: Vec<PlayerRow>,
    pub matches: Vec<MatchRow>,
    pub stats: Vec<(Period, StatRow)>,
}

impl MatchRows {
    pub fn document_match_id(doc: &Value) -> Option<i64> {
        doc.at("general").at("matchId").i64_val()
    }

    /// `match_id` is used for stat rows when the document has no `general.matchId`.
    pub fn from_document(doc: &Value, match_id: i64) -> MatchRows {
        let match_id = MatchRows::document_match_id(doc).unwrap_or(match_id);
        let stats = Period::get_all().into_iter()
            .flat_map(|period| stats(doc, period, match_id).into_iter().map(move |row| (period, row)))
            .collect();

        MatchRows {
            teams: teams(doc),
            leagues: leagues(doc),
            players: players(doc),
            matches: matches(doc),
            stats,
        }
    }
}
