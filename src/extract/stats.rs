use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::nested::Nested;
use crate::models::Period;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatRow {
    pub match_id: i64,
    pub stat_category: Option<String>,
    pub stat_key: Option<String>,
    pub stat_name: Option<String>,
    pub home_value: Option<String>,
    pub away_value: Option<String>,
    pub h_a_flag: Option<String>,
}

/// Rows of `content.stats.Periods.<period>`: category -> statistic.
/// Entries typed "title" are section headers and produce no row.
pub fn stats(doc: &Value, period: Period, match_id: i64) -> Vec<StatRow> {
    let categories = doc.at("content").at("stats").at("Periods")
        .at(period.label()).at("stats").items();

    let mut rows = vec![];
    for category in categories {
        let stat_category = category.at("title").str_val();
        for stat in category.at("stats").items() {
            if stat.at("type").as_str() == Some("title") {
                continue;
            }
            let values = stat.at("stats");
            rows.push(StatRow {
                match_id,
                stat_category: stat_category.clone(),
                stat_key: stat.at("key").str_val(),
                stat_name: stat.at("title").str_val(),
                home_value: values.idx(0).text(),
                away_value: values.idx(1).text(),
                h_a_flag: stat.at("highlighted").text(),
            });
        }
    }
    rows
}
