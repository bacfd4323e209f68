use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::nested::Nested;
use crate::models::{Role, Side};

/// One appearance of a player in a match. Which of the performance fields
/// (position, shirt, rating, substitution times) or the unavailability
/// fields are set depends on `role`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerRow {
    pub match_id: Option<i64>,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub side: Side,
    pub role: Role,

    pub player_id: Option<i64>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,

    pub position_id: Option<i64>,
    pub usual_position_id: Option<i64>,
    pub shirt_number: Option<String>,

    pub rating: Option<f64>,
    pub sub_in_time: Option<i64>,
    pub sub_out_time: Option<i64>,

    pub unavailability_type: Option<String>,
    pub expected_return: Option<String>,
}

/// Minute of the first substitution event of `kind` ("subIn" / "subOut").
fn substitution_time(player: &Value, kind: &str) -> Option<i64> {
    player.at("performance").at("substitutionEvents").items().iter()
        .find(|e| e.at("type").as_str() == Some(kind))
        .and_then(|e| e.at("time").i64_val())
}

fn player_row(match_id: Option<i64>, team: &Value, side: Side, role: Role, p: &Value) -> PlayerRow {
    let performance = p.at("performance");
    let unavailability = p.at("unavailability");
    let plays = role != Role::Unavailable;

    PlayerRow {
        match_id,
        team_id: team.at("id").i64_val(),
        team_name: team.at("name").str_val(),
        side,
        role,

        player_id: p.at("id").i64_val(),
        name: p.at("name").str_val(),
        first_name: p.at("firstName").str_val(),
        last_name: p.at("lastName").str_val(),
        age: p.at("age").i64_val(),
        country_name: p.at("countryName").str_val(),
        country_code: p.at("countryCode").str_val(),

        position_id: if role == Role::Starter { p.at("positionId").i64_val() } else { None },
        usual_position_id: if plays { p.at("usualPlayingPositionId").i64_val() } else { None },
        shirt_number: if plays { p.at("shirtNumber").text() } else { None },

        rating: if plays { performance.at("rating").f64_val() } else { None },
        sub_in_time: if role == Role::Sub { substitution_time(p, "subIn") } else { None },
        sub_out_time: if role == Role::Starter { substitution_time(p, "subOut") } else { None },

        unavailability_type: if plays { None } else { unavailability.at("type").str_val() },
        expected_return: if plays { None } else { unavailability.at("expectedReturn").text() },
    }
}

/// Every starter, sub and unavailable player of both sides, home first.
pub fn players(doc: &Value) -> Vec<PlayerRow> {
    let match_id = doc.at("general").at("matchId").i64_val();
    let lineup = doc.at("content").at("lineup");

    let mut rows = vec![];
    for side in [Side::Home, Side::Away] {
        let team = lineup.at(side.lineup_key());
        for role in Role::get_all() {
            rows.extend(team.at(role.group_key()).items().iter()
                .map(|p| player_row(match_id, team, side, role, p)));
        }
    }
    rows
}
