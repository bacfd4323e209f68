use serde::{Deserialize, Serialize};

use crate::models::StringOrNum;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FixtureTeam {
    #[serde(default)]
    pub id: Option<StringOrNum>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FixtureStatus {
    #[serde(default)]
    pub finished: Option<bool>,
    #[serde(default)]
    pub started: Option<bool>,
    #[serde(default)]
    pub cancelled: Option<bool>,
}

/// Entry of `fixtures.allMatches` in the `leagues` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Fixture {
    pub id: StringOrNum,
    #[serde(default)]
    pub round: Option<StringOrNum>,
    #[serde(default)]
    pub home: FixtureTeam,
    #[serde(default)]
    pub away: FixtureTeam,
    #[serde(default)]
    pub status: FixtureStatus,
}

impl Fixture {
    pub fn involves(&self, team_id: &StringOrNum) -> bool {
        let team_id = team_id.to_str();
        [&self.home.id, &self.away.id].iter()
            .any(|id| id.as_ref().map(|id| id.to_str() == team_id).unwrap_or(false))
    }

    pub fn is_finished(&self) -> bool {
        self.status.finished.unwrap_or(false)
    }
}
