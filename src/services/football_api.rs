//! Client for API-Football (api-sports.io).
//!
//! Auth: `x-apisports-key` header, static key. The upstream is rate-limited
//! and occasionally incomplete, so callers must treat an empty `response`
//! array as a normal outcome, not an error.

use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::settings::FootballApiSettings;

#[derive(Debug, thiserror::Error)]
pub enum FootballApiError {
    #[error("FOOTBALL_API_KEY not configured")]
    MissingKey,
    #[error("request to football API failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("football API responded with status: {0}")]
    Status(u16),
    #[error("failed to decode football API response: {0}")]
    Payload(reqwest::Error),
}

// Wire types mirroring the fields we consume from the v3 fixtures endpoint.

#[derive(Debug, Deserialize)]
struct FixturesResponse {
    #[serde(default)]
    response: Vec<ApiFixture>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiFixture {
    pub fixture: ApiFixtureCore,
    pub league: ApiLeague,
    pub teams: ApiTeams,
    pub goals: ApiGoals,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiFixtureCore {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub status: ApiStatus,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiStatus {
    pub short: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiLeague {
    pub id: i32,
    pub round: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiTeams {
    pub home: ApiTeam,
    pub away: ApiTeam,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiTeam {
    pub id: i32,
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiGoals {
    pub home: Option<i32>,
    pub away: Option<i32>,
}

#[derive(Clone)]
pub struct FootballApiClient {
    http: reqwest::Client,
    base_url: String,
    key: SecretString,
}

impl FootballApiClient {
    pub fn new(settings: &FootballApiSettings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            key: settings.key.clone(),
        })
    }

    /// The next `next` fixtures for a team in a season.
    pub async fn fetch_upcoming_fixtures(
        &self,
        team_id: u32,
        season: u16,
        next: u8,
    ) -> Result<Vec<ApiFixture>, FootballApiError> {
        let response = self
            .request(&[
                ("team", team_id.to_string()),
                ("season", season.to_string()),
                ("next", next.to_string()),
            ])
            .await?;

        Ok(response.response)
    }

    /// Current state of a single fixture. `None` when the upstream returns
    /// no data for the id.
    pub async fn fetch_fixture(
        &self,
        fixture_id: i64,
    ) -> Result<Option<ApiFixture>, FootballApiError> {
        let response = self
            .request(&[("id", fixture_id.to_string())])
            .await?;

        Ok(response.response.into_iter().next())
    }

    async fn request(
        &self,
        params: &[(&str, String)],
    ) -> Result<FixturesResponse, FootballApiError> {
        if self.key.expose_secret().is_empty() {
            return Err(FootballApiError::MissingKey);
        }

        let response = self
            .http
            .get(format!("{}/fixtures", self.base_url))
            .query(params)
            .header("x-apisports-key", self.key.expose_secret())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FootballApiError::Status(response.status().as_u16()));
        }

        response
            .json::<FixturesResponse>()
            .await
            .map_err(FootballApiError::Payload)
    }
}
