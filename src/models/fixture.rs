// src/models/fixture.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Upstream short codes that count as "match in progress". Anything that is
/// neither `NS` nor one of these is treated as terminal.
pub const LIVE_STATUS_CODES: [&str; 7] = ["1H", "HT", "2H", "ET", "P", "BT", "LIVE"];

/// One scheduled or played match, keyed by the upstream fixture id.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Fixture {
    pub id: i64,
    pub date_time: DateTime<Utc>,
    pub status_short: String,
    pub home_team_id: i32,
    pub home_team_name: String,
    pub home_team_logo: String,
    pub away_team_id: i32,
    pub away_team_name: String,
    pub away_team_logo: String,
    pub league_id: i32,
    pub round: Option<String>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub processed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload for a fixture row. Scores stay nullable: the upstream
/// returns null goals until kickoff.
#[derive(Debug, Clone)]
pub struct NewFixture {
    pub id: i64,
    pub date_time: DateTime<Utc>,
    pub status_short: String,
    pub home_team_id: i32,
    pub home_team_name: String,
    pub home_team_logo: String,
    pub away_team_id: i32,
    pub away_team_name: String,
    pub away_team_logo: String,
    pub league_id: i32,
    pub round: Option<String>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

/// Abstracted view of an upstream status short code.
///
/// `NS` is the unique initial state and the only one that accepts
/// predictions. The in-progress sub-states are opaque to the lifecycle
/// logic. Every other code (full time, abandoned, walkover, ...) is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Scheduled,
    InProgress,
    Finished,
}

impl StatusCategory {
    pub fn from_short(code: &str) -> Self {
        match code {
            "NS" => StatusCategory::Scheduled,
            c if LIVE_STATUS_CODES.contains(&c) => StatusCategory::InProgress,
            _ => StatusCategory::Finished,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpcomingFixturesQuery {
    pub limit: Option<i64>,
}
