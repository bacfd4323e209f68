use serde_json::Value;

use crate::rest_client::FotmobClient;

pub struct MatchService;

impl MatchService {
    /// Full match document, `None` when the access layer gave up.
    pub async fn match_details(client: &mut FotmobClient, match_id: i64) -> Option<Value> {
        client.request("matchDetails", &[("matchId", match_id.to_string())]).await
    }
}
