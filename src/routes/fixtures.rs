// src/routes/fixtures.rs
use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::config::settings::FootballApiSettings;
use crate::handlers::fixtures::{fixture_handler, live_update_handler, sync_handler};
use crate::models::fixture::UpcomingFixturesQuery;
use crate::services::FootballApiClient;

/// Pull the configured window of upcoming fixtures into the store
#[post("/sync")]
async fn sync_fixtures(
    pool: web::Data<PgPool>,
    client: web::Data<FootballApiClient>,
    settings: web::Data<FootballApiSettings>,
) -> HttpResponse {
    sync_handler::sync_fixtures(pool, client, settings).await
}

/// Re-poll imminent and in-progress fixtures
#[post("/update_live")]
async fn update_live_fixtures(
    pool: web::Data<PgPool>,
    client: web::Data<FootballApiClient>,
    settings: web::Data<FootballApiSettings>,
) -> HttpResponse {
    live_update_handler::update_live_fixtures(pool, client, settings).await
}

/// Upcoming fixtures, soonest first
#[get("/upcoming")]
async fn get_upcoming_fixtures(
    query: web::Query<UpcomingFixturesQuery>,
    pool: web::Data<PgPool>,
) -> HttpResponse {
    fixture_handler::get_upcoming_fixtures(query, pool).await
}

/// Fixtures currently in progress
#[get("/live")]
async fn get_live_fixtures(pool: web::Data<PgPool>) -> HttpResponse {
    fixture_handler::get_live_fixtures(pool).await
}

/// One fixture by its upstream id
#[get("/{fixture_id}")]
async fn get_fixture(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> HttpResponse {
    fixture_handler::get_fixture(path, pool).await
}
