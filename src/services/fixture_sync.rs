use serde::Serialize;
use sqlx::PgPool;

use crate::config::settings::FootballApiSettings;
use crate::db::fixture_queries;
use crate::models::fixture::NewFixture;
use crate::services::football_api::{ApiFixture, FootballApiClient, FootballApiError};

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] FootballApiError),
    #[error("failed to write fixtures: {0}")]
    Store(#[from] sqlx::Error),
}

#[derive(Debug, Serialize, Clone)]
pub struct SyncedFixture {
    pub id: i64,
    pub home: String,
    pub away: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct SyncSummary {
    pub synced: usize,
    pub fixtures: Vec<SyncedFixture>,
}

/// Keeps the fixture store populated with the forward-looking window of
/// fixtures for the configured team/season.
pub struct FixtureSyncService {
    pool: PgPool,
    client: FootballApiClient,
    team_id: u32,
    season: u16,
    next_fixtures: u8,
}

impl FixtureSyncService {
    pub fn new(pool: PgPool, client: FootballApiClient, settings: &FootballApiSettings) -> Self {
        Self {
            pool,
            client,
            team_id: settings.team_id,
            season: settings.season,
            next_fixtures: settings.next_fixtures,
        }
    }

    /// Fetch the window and upsert it as one batch. Idempotent: re-running
    /// against an unchanged upstream rewrites the same rows. An empty
    /// window is success with zero synced, not an error.
    pub async fn sync(&self) -> Result<SyncSummary, SyncError> {
        let api_fixtures = self
            .client
            .fetch_upcoming_fixtures(self.team_id, self.season, self.next_fixtures)
            .await?;

        tracing::info!(
            "Received {} fixtures from API for team {} season {}",
            api_fixtures.len(),
            self.team_id,
            self.season
        );

        if api_fixtures.is_empty() {
            return Ok(SyncSummary { synced: 0, fixtures: Vec::new() });
        }

        let rows: Vec<NewFixture> = api_fixtures.iter().map(map_fixture).collect();

        fixture_queries::upsert_fixtures(&self.pool, &rows).await?;

        let fixtures: Vec<SyncedFixture> = rows
            .iter()
            .map(|f| SyncedFixture {
                id: f.id,
                home: f.home_team_name.clone(),
                away: f.away_team_name.clone(),
            })
            .collect();

        tracing::info!("✅ Synced {} fixtures", fixtures.len());

        Ok(SyncSummary { synced: fixtures.len(), fixtures })
    }
}

fn map_fixture(api: &ApiFixture) -> NewFixture {
    NewFixture {
        id: api.fixture.id,
        date_time: api.fixture.date,
        status_short: api.fixture.status.short.clone(),
        home_team_id: api.teams.home.id,
        home_team_name: api.teams.home.name.clone(),
        home_team_logo: api.teams.home.logo.clone(),
        away_team_id: api.teams.away.id,
        away_team_name: api.teams.away.name.clone(),
        away_team_logo: api.teams.away.logo.clone(),
        league_id: api.league.id,
        round: api.league.round.clone(),
        home_score: api.goals.home,
        away_score: api.goals.away,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::football_api::{
        ApiFixtureCore, ApiGoals, ApiLeague, ApiStatus, ApiTeam, ApiTeams,
    };
    use chrono::Utc;

    fn sample_api_fixture() -> ApiFixture {
        ApiFixture {
            fixture: ApiFixtureCore {
                id: 9001,
                date: Utc::now(),
                status: ApiStatus { short: "NS".to_string() },
            },
            league: ApiLeague { id: 71, round: Some("Regular Season - 1".to_string()) },
            teams: ApiTeams {
                home: ApiTeam {
                    id: 121,
                    name: "Palmeiras".to_string(),
                    logo: "https://media.api-sports.io/teams/121.png".to_string(),
                },
                away: ApiTeam {
                    id: 127,
                    name: "Flamengo".to_string(),
                    logo: "https://media.api-sports.io/teams/127.png".to_string(),
                },
            },
            goals: ApiGoals { home: None, away: None },
        }
    }

    #[test]
    fn maps_api_fixture_to_row() {
        let row = map_fixture(&sample_api_fixture());
        assert_eq!(row.id, 9001);
        assert_eq!(row.status_short, "NS");
        assert_eq!(row.home_team_name, "Palmeiras");
        assert_eq!(row.away_team_id, 127);
        assert_eq!(row.league_id, 71);
        assert_eq!(row.home_score, None);
    }
}
