use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{Router, extract::{Query, State}, Json, routing::get};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{sync::RwLock, task::JoinHandle};

#[derive(Deserialize)]
struct LeaguesQuery {
    id: String,
    season: String,
}

#[allow(non_snake_case)]
#[derive(Deserialize)]
struct MatchQuery {
    matchId: String,
}

/// What the mock FotMob API serves and how often it was asked.
#[derive(Default)]
pub struct ApiState {
    pub leagues: HashMap<(String, String), Value>,
    pub matches: HashMap<String, Value>,
    /// Number of 500 responses to give for a match id before serving it.
    pub failures: HashMap<String, u32>,
    pub league_calls: u32,
    pub match_calls: HashMap<String, u32>,
}

pub struct ExternalServer {
    addr: Option<SocketAddr>,
    handles: Vec<JoinHandle<()>>,
    pub api_state: Arc<RwLock<ApiState>>,
}

impl Drop for ExternalServer {
    fn drop(&mut self) {
        for e in &self.handles {
            e.abort();
        }
    }
}

impl ExternalServer {
    pub fn new() -> ExternalServer {
        ExternalServer { addr: None, handles: vec![], api_state: Arc::new(RwLock::new(ApiState::default())) }
    }

    pub async fn start(&mut self) {
        let app = Router::new()
            .route("/api/leagues", get(ExternalServer::get_leagues))
            .route("/api/matchDetails", get(ExternalServer::get_match_details))
            .with_state(self.api_state.clone());

        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(app.into_make_service());
        self.addr = Some(server.local_addr());
        self.handles.push(tokio::spawn(async move {
            server.await.unwrap();
        }));
    }

    pub fn get_url(&self) -> String {
        let addr = self.addr.expect("server should be started");
        format!("http://{}", addr)
    }

    pub async fn add_fixtures(&self, league_id: &str, season: &str, fixtures: Vec<Value>) {
        let rsp = json!({ "details": { "id": league_id }, "fixtures": { "allMatches": fixtures } });
        self.api_state.write().await.leagues.insert((league_id.to_string(), season.to_string()), rsp);
    }

    pub async fn add_match(&self, match_id: &str, doc: Value) {
        self.api_state.write().await.matches.insert(match_id.to_string(), doc);
    }

    pub async fn fail_match(&self, match_id: &str, times: u32) {
        self.api_state.write().await.failures.insert(match_id.to_string(), times);
    }

    pub async fn league_calls(&self) -> u32 {
        self.api_state.read().await.league_calls
    }

    pub async fn match_calls(&self, match_id: &str) -> u32 {
        self.api_state.read().await.match_calls.get(match_id).copied().unwrap_or(0)
    }

    async fn get_leagues(State(state): State<Arc<RwLock<ApiState>>>, query: Query<LeaguesQuery>) -> Result<Json<Value>, StatusCode> {
        let mut state = state.write().await;
        state.league_calls += 1;
        state.leagues.get(&(query.id.clone(), query.season.clone()))
            .cloned()
            .map(Json)
            .ok_or(StatusCode::NOT_FOUND)
    }

    async fn get_match_details(State(state): State<Arc<RwLock<ApiState>>>, query: Query<MatchQuery>) -> Result<Json<Value>, StatusCode> {
        let mut state = state.write().await;
        *state.match_calls.entry(query.matchId.clone()).or_insert(0) += 1;
        if let Some(left) = state.failures.get_mut(&query.matchId) {
            if *left > 0 {
                *left -= 1;
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
        state.matches.get(&query.matchId)
            .cloned()
            .map(Json)
            .ok_or(StatusCode::NOT_FOUND)
    }
}

/// Minimal match document with the given id and teams.
pub fn match_doc(match_id: i64, home_id: i64, away_id: i64) -> Value {
    json!({
        "general": {
            "matchId": match_id.to_string(),
            "leagueId": 87,
            "leagueName": "LaLiga",
            "homeTeam": { "id": home_id },
            "awayTeam": { "id": away_id }
        },
        "header": { "teams": [ { "score": 2 }, { "score": 0 } ] }
    })
}

pub fn fixture(match_id: Value, home_id: Value, away_id: Value, finished: bool) -> Value {
    json!({
        "id": match_id,
        "home": { "id": home_id },
        "away": { "id": away_id },
        "status": { "finished": finished, "started": finished }
    })
}
