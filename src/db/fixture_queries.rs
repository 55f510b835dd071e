use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::fixture::{Fixture, NewFixture, LIVE_STATUS_CODES};

/// Minimal projection used by the live-update sweep.
#[derive(Debug, FromRow, Clone)]
pub struct FixtureToCheck {
    pub id: i64,
    pub status_short: String,
    pub date_time: DateTime<Utc>,
}

fn live_codes() -> Vec<String> {
    LIVE_STATUS_CODES.iter().map(|c| c.to_string()).collect()
}

/// Upsert a batch of fixtures inside a single transaction. Either every
/// fixture of the batch lands or none does. Re-syncing an existing row
/// overwrites all upstream-owned columns and resets `processed`.
pub async fn upsert_fixtures(
    pool: &PgPool,
    fixtures: &[NewFixture],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for fixture in fixtures {
        sqlx::query(
            r#"
            INSERT INTO fixtures (
                id, date_time, status_short,
                home_team_id, home_team_name, home_team_logo,
                away_team_id, away_team_name, away_team_logo,
                league_id, round, home_score, away_score,
                processed, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, FALSE, NOW())
            ON CONFLICT (id) DO UPDATE SET
                date_time = EXCLUDED.date_time,
                status_short = EXCLUDED.status_short,
                home_team_id = EXCLUDED.home_team_id,
                home_team_name = EXCLUDED.home_team_name,
                home_team_logo = EXCLUDED.home_team_logo,
                away_team_id = EXCLUDED.away_team_id,
                away_team_name = EXCLUDED.away_team_name,
                away_team_logo = EXCLUDED.away_team_logo,
                league_id = EXCLUDED.league_id,
                round = EXCLUDED.round,
                home_score = EXCLUDED.home_score,
                away_score = EXCLUDED.away_score,
                processed = FALSE,
                updated_at = NOW()
            "#,
        )
        .bind(fixture.id)
        .bind(fixture.date_time)
        .bind(&fixture.status_short)
        .bind(fixture.home_team_id)
        .bind(&fixture.home_team_name)
        .bind(&fixture.home_team_logo)
        .bind(fixture.away_team_id)
        .bind(&fixture.away_team_name)
        .bind(&fixture.away_team_logo)
        .bind(fixture.league_id)
        .bind(&fixture.round)
        .bind(fixture.home_score)
        .bind(fixture.away_score)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

/// Fixtures the live updater should poll: scheduled ones about to kick off
/// plus everything currently in progress. Terminal rows are never selected,
/// which is what keeps the status sequence from moving backward.
pub async fn fixtures_to_check(
    pool: &PgPool,
    lead_window_minutes: i64,
) -> Result<Vec<FixtureToCheck>, sqlx::Error> {
    sqlx::query_as::<_, FixtureToCheck>(
        r#"
        SELECT id, status_short, date_time
        FROM fixtures
        WHERE (status_short = 'NS' AND date_time <= $1)
           OR status_short = ANY($2)
        ORDER BY date_time
        "#,
    )
    .bind(Utc::now() + Duration::minutes(lead_window_minutes))
    .bind(live_codes())
    .fetch_all(pool)
    .await
}

/// Targeted write of the polled state for one fixture.
pub async fn update_fixture_state(
    pool: &PgPool,
    fixture_id: i64,
    status_short: &str,
    home_score: Option<i32>,
    away_score: Option<i32>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE fixtures
        SET status_short = $2,
            home_score = $3,
            away_score = $4,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(fixture_id)
    .bind(status_short)
    .bind(home_score)
    .bind(away_score)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_fixture(
    pool: &PgPool,
    fixture_id: i64,
) -> Result<Option<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(
        r#"
        SELECT * FROM fixtures WHERE id = $1
        "#,
    )
    .bind(fixture_id)
    .fetch_optional(pool)
    .await
}

/// Fresh read of just the status column. The prediction gateway checks this
/// at write time; the stored row is the single source of truth for locking.
pub async fn get_fixture_status(
    pool: &PgPool,
    fixture_id: i64,
) -> Result<Option<String>, sqlx::Error> {
    let status = sqlx::query_scalar::<_, String>(
        r#"
        SELECT status_short FROM fixtures WHERE id = $1
        "#,
    )
    .bind(fixture_id)
    .fetch_optional(pool)
    .await?;

    Ok(status)
}

pub async fn upcoming_fixtures(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(
        r#"
        SELECT * FROM fixtures
        WHERE status_short = 'NS'
        ORDER BY date_time
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn live_fixtures(pool: &PgPool) -> Result<Vec<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(
        r#"
        SELECT * FROM fixtures
        WHERE status_short = ANY($1)
        ORDER BY date_time
        "#,
    )
    .bind(live_codes())
    .fetch_all(pool)
    .await
}
