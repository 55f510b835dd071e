use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

/// Insert a fixture row directly, bypassing the sync job.
pub async fn insert_fixture(
    pool: &PgPool,
    id: i64,
    status_short: &str,
    date_time: DateTime<Utc>,
) {
    sqlx::query(
        r#"
        INSERT INTO fixtures (
            id, date_time, status_short,
            home_team_id, home_team_name, home_team_logo,
            away_team_id, away_team_name, away_team_logo,
            league_id, round
        )
        VALUES ($1, $2, $3, 121, 'Palmeiras', 'https://media.api-sports.io/teams/121.png',
                127, 'Flamengo', 'https://media.api-sports.io/teams/127.png',
                71, 'Regular Season - 1')
        "#,
    )
    .bind(id)
    .bind(date_time)
    .bind(status_short)
    .execute(pool)
    .await
    .expect("Failed to insert fixture");
}

pub async fn set_fixture_status(pool: &PgPool, id: i64, status_short: &str) {
    sqlx::query("UPDATE fixtures SET status_short = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(status_short)
        .execute(pool)
        .await
        .expect("Failed to update fixture status");
}

pub async fn set_fixture_processed(pool: &PgPool, id: i64, processed: bool) {
    sqlx::query("UPDATE fixtures SET processed = $2 WHERE id = $1")
        .bind(id)
        .bind(processed)
        .execute(pool)
        .await
        .expect("Failed to update fixture processed flag");
}

/// (status_short, home_score, away_score, processed) for one fixture.
pub async fn fixture_state(pool: &PgPool, id: i64) -> (String, Option<i32>, Option<i32>, bool) {
    let row = sqlx::query(
        "SELECT status_short, home_score, away_score, processed FROM fixtures WHERE id = $1",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .expect("Failed to fetch fixture");

    (
        row.get("status_short"),
        row.get("home_score"),
        row.get("away_score"),
        row.get("processed"),
    )
}

pub async fn count_fixtures(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fixtures")
        .fetch_one(pool)
        .await
        .expect("Failed to count fixtures")
}

/// The stored (home_score, away_score) prediction for a fixture, if any.
/// Tests create a single user per app, so the fixture id is enough.
pub async fn prediction_scores(pool: &PgPool, fixture_id: i64) -> Option<(i32, i32)> {
    sqlx::query("SELECT home_score, away_score FROM predictions WHERE fixture_id = $1")
        .bind(fixture_id)
        .fetch_optional(pool)
        .await
        .expect("Failed to fetch prediction")
        .map(|row| (row.get("home_score"), row.get("away_score")))
}

pub async fn count_predictions(pool: &PgPool, fixture_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM predictions WHERE fixture_id = $1")
        .bind(fixture_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count predictions")
}
