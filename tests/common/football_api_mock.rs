//! In-test stand-in for API-Football: one `/fixtures` endpoint that answers
//! window queries (team/season/next) and single-id queries from canned data.

use actix_web::{web, App, HttpResponse, HttpServer};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::TcpListener;

#[derive(Clone, Default)]
pub struct MockFootballApi {
    /// Fixtures returned for window (team+season+next) queries.
    pub window: Vec<Value>,
    /// Per-id responses for single-fixture queries.
    pub by_id: HashMap<i64, Value>,
    /// Ids whose single-fixture query returns a 500.
    pub failing_ids: Vec<i64>,
    /// When set, window queries return a 500.
    pub fail_window: bool,
}

/// Build an API-Football fixture object the way v3 returns it.
pub fn api_fixture(
    id: i64,
    date: DateTime<Utc>,
    status: &str,
    home: &str,
    away: &str,
    home_goals: Option<i32>,
    away_goals: Option<i32>,
) -> Value {
    json!({
        "fixture": {
            "id": id,
            "date": date.to_rfc3339(),
            "status": { "long": "", "short": status, "elapsed": null }
        },
        "league": { "id": 71, "name": "Série A", "round": "Regular Season - 1" },
        "teams": {
            "home": { "id": 121, "name": home, "logo": "https://media.api-sports.io/teams/121.png" },
            "away": { "id": 127, "name": away, "logo": "https://media.api-sports.io/teams/127.png" }
        },
        "goals": { "home": home_goals, "away": away_goals }
    })
}

pub async fn spawn_football_api(mock: MockFootballApi) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind mock API port");
    let port = listener.local_addr().unwrap().port();
    let state = web::Data::new(mock);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/fixtures", web::get().to(fixtures_endpoint))
    })
    .listen(listener)
    .expect("Failed to listen on mock API port")
    .workers(1)
    .run();
    let _ = tokio::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

async fn fixtures_endpoint(
    state: web::Data<MockFootballApi>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    if let Some(id) = query.get("id").and_then(|v| v.parse::<i64>().ok()) {
        if state.failing_ids.contains(&id) {
            return HttpResponse::InternalServerError().finish();
        }
        let response: Vec<Value> = state.by_id.get(&id).cloned().into_iter().collect();
        return HttpResponse::Ok()
            .json(json!({ "results": response.len(), "response": response }));
    }

    if state.fail_window {
        return HttpResponse::InternalServerError().finish();
    }
    HttpResponse::Ok()
        .json(json!({ "results": state.window.len(), "response": state.window }))
}
