use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::nested::Nested;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamRow {
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub country_code: Option<String>,
    pub stadium_name: Option<String>,
    pub stadium_city: Option<String>,
    pub stadium_capacity: Option<i64>,
    pub stadium_lat: Option<f64>,
    pub stadium_lon: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LeagueRow {
    pub league_id: Option<i64>,
    pub league_name: Option<String>,
}

/// `Attendance` is either a bare number or `{ "number": n }`.
fn attendance(info_box: &Value) -> Option<i64> {
    let attendance = info_box.at("Attendance");
    if attendance.is_object() {
        attendance.at("number").i64_val()
    } else {
        attendance.i64_val()
    }
}

/// `Stadium` is either an object with a name or the name itself.
fn stadium_name(info_box: &Value) -> Option<String> {
    let stadium = info_box.at("Stadium");
    if stadium.is_object() {
        stadium.at("name").str_val()
    } else {
        stadium.str_val()
    }
}

/// Home and away rows, in that order. Venue details only exist for the home side.
pub fn teams(doc: &Value) -> Vec<TeamRow> {
    let general = doc.at("general");
    let info_box = doc.at("content").at("matchFacts").at("infoBox");
    let location = doc.at("seo").at("eventJSONLD").at("location");
    let country_code = general.at("countryCode").str_val();

    let home = general.at("homeTeam");
    let away = general.at("awayTeam");

    vec![
        TeamRow {
            team_id: home.at("id").i64_val(),
            team_name: home.at("name").str_val(),
            country_code: country_code.clone(),
            stadium_name: stadium_name(info_box),
            stadium_city: location.at("address").at("addressLocality").str_val(),
            stadium_capacity: attendance(info_box),
            stadium_lat: location.at("latitude").f64_val(),
            stadium_lon: location.at("longitude").f64_val(),
        },
        TeamRow {
            team_id: away.at("id").i64_val(),
            team_name: away.at("name").str_val(),
            country_code,
            stadium_name: None,
            stadium_city: None,
            stadium_capacity: None,
            stadium_lat: None,
            stadium_lon: None,
        },
    ]
}

pub fn leagues(doc: &Value) -> Vec<LeagueRow> {
    let general = doc.at("general");
    vec![LeagueRow {
        league_id: general.at("leagueId").i64_val(),
        league_name: general.at("leagueName").str_val(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_attendance(attendance: Value) -> Value {
        json!({
            "general": {
                "countryCode": "ESP",
                "homeTeam": { "id": 8633, "name": "Real Madrid" },
                "awayTeam": { "id": "9906", "name": "Atletico Madrid" }
            },
            "content": { "matchFacts": { "infoBox": {
                "Stadium": { "name": "Santiago Bernabeu" },
                "Attendance": attendance
            } } },
            "seo": { "eventJSONLD": { "location": {
                "address": { "addressLocality": "Madrid" },
                "latitude": 40.453,
                "longitude": -3.688
            } } }
        })
    }

    #[test]
    fn attendance_object_and_number_resolve_alike() {
        let from_object = teams(&doc_with_attendance(json!({ "number": 81044 })));
        let from_number = teams(&doc_with_attendance(json!(81044)));
        assert_eq!(from_object[0].stadium_capacity, Some(81044));
        assert_eq!(from_number[0].stadium_capacity, Some(81044));
        assert_eq!(from_object, from_number);
    }

    #[test]
    fn home_row_carries_venue_and_away_row_does_not() {
        let rows = teams(&doc_with_attendance(json!(81044)));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team_id, Some(8633));
        assert_eq!(rows[0].stadium_name.as_deref(), Some("Santiago Bernabeu"));
        assert_eq!(rows[0].stadium_city.as_deref(), Some("Madrid"));
        assert_eq!(rows[0].stadium_lat, Some(40.453));
        assert_eq!(rows[0].stadium_lon, Some(-3.688));

        assert_eq!(rows[1].team_id, Some(9906));
        assert_eq!(rows[1].country_code.as_deref(), Some("ESP"));
        assert_eq!(rows[1].stadium_name, None);
        assert_eq!(rows[1].stadium_city, None);
        assert_eq!(rows[1].stadium_capacity, None);
        assert_eq!(rows[1].stadium_lat, None);
        assert_eq!(rows[1].stadium_lon, None);
    }

    #[test]
    fn stadium_given_as_plain_string() {
        let mut doc = doc_with_attendance(json!(1));
        doc["content"]["matchFacts"]["infoBox"]["Stadium"] = json!("Metropolitano");
        assert_eq!(teams(&doc)[0].stadium_name.as_deref(), Some("Metropolitano"));
    }

    #[test]
    fn empty_document_still_yields_two_rows() {
        let rows = teams(&json!({}));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.team_id.is_none() && r.stadium_capacity.is_none()));
    }

    #[test]
    fn league_row() {
        let rows = leagues(&json!({ "general": { "leagueId": 87, "leagueName": "LaLiga" } }));
        assert_eq!(rows, vec![LeagueRow { league_id: Some(87), league_name: Some("LaLiga".to_string()) }]);
        assert_eq!(leagues(&json!(null)), vec![LeagueRow { league_id: None, league_name: None }]);
    }
}
