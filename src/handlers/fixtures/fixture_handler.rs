use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::db::fixture_queries;
use crate::models::fixture::UpcomingFixturesQuery;

const DEFAULT_UPCOMING_LIMIT: i64 = 10;

pub async fn get_upcoming_fixtures(
    query: web::Query<UpcomingFixturesQuery>,
    pool: web::Data<PgPool>,
) -> HttpResponse {
    let limit = query.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);

    match fixture_queries::upcoming_fixtures(&pool, limit).await {
        Ok(fixtures) => HttpResponse::Ok().json(fixtures),
        Err(e) => {
            tracing::error!("Failed to fetch upcoming fixtures: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Erro ao buscar partidas" }))
        }
    }
}

pub async fn get_live_fixtures(pool: web::Data<PgPool>) -> HttpResponse {
    match fixture_queries::live_fixtures(&pool).await {
        Ok(fixtures) => HttpResponse::Ok().json(fixtures),
        Err(e) => {
            tracing::error!("Failed to fetch live fixtures: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Erro ao buscar partidas" }))
        }
    }
}

pub async fn get_fixture(
    fixture_id: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> HttpResponse {
    let fixture_id = fixture_id.into_inner();

    match fixture_queries::get_fixture(&pool, fixture_id).await {
        Ok(Some(fixture)) => HttpResponse::Ok().json(fixture),
        Ok(None) => HttpResponse::NotFound()
            .json(json!({ "error": "Partida não encontrada" })),
        Err(e) => {
            tracing::error!("Failed to fetch fixture {}: {}", fixture_id, e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Erro ao buscar partida" }))
        }
    }
}
