use sqlx::PgPool;
use uuid::Uuid;

use crate::models::prediction::Prediction;

/// Insert-or-overwrite the caller's prediction for a fixture. The unique
/// (user_id, fixture_id) constraint realizes "edit your prediction until
/// kickoff"; the lock itself is enforced by the handler against the
/// fixture's stored status.
pub async fn upsert_prediction(
    pool: &PgPool,
    user_id: Uuid,
    fixture_id: i64,
    home_score: i32,
    away_score: i32,
) -> Result<Prediction, sqlx::Error> {
    let prediction = sqlx::query_as::<_, Prediction>(
        r#"
        INSERT INTO predictions (user_id, fixture_id, home_score, away_score)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, fixture_id)
        DO UPDATE SET home_score = $3, away_score = $4, updated_at = NOW()
        RETURNING id, user_id, fixture_id, home_score, away_score, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(fixture_id)
    .bind(home_score)
    .bind(away_score)
    .fetch_one(pool)
    .await?;

    Ok(prediction)
}

pub async fn predictions_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(
        r#"
        SELECT id, user_id, fixture_id, home_score, away_score, created_at, updated_at
        FROM predictions
        WHERE user_id = $1
        ORDER BY updated_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
