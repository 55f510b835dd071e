// src/handlers/prediction_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::db::{fixture_queries, prediction_queries};
use crate::middleware::auth::Claims;
use crate::models::fixture::StatusCategory;
use crate::models::prediction::PredictionPayload;

/// Save or overwrite the caller's prediction for a fixture.
///
/// The lock check reads the fixture's stored status at request time; a
/// client-supplied or cached status is never trusted. The read and the
/// upsert are separate statements, so a status flip by the live updater can
/// slip between them, a narrow window bounded by its polling cadence. A
/// conditional upsert (write only where status is still 'NS') would close
/// it at the cost of folding the lookup into the write.
#[tracing::instrument(
    name = "Save prediction",
    skip(payload, pool, claims),
    fields(
        fixture_id = %payload.fixture_id
    )
)]
pub async fn save_prediction(
    payload: web::Json<PredictionPayload>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => {
            tracing::error!("Token subject is not a valid user id");
            return HttpResponse::Unauthorized()
                .json(json!({ "error": "Usuário não autenticado" }));
        }
    };

    if payload.home_score < 0 || payload.away_score < 0 {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "Placar não pode ser negativo" }));
    }

    let status = match fixture_queries::get_fixture_status(&pool, payload.fixture_id).await {
        Ok(Some(status)) => status,
        Ok(None) => {
            return HttpResponse::NotFound()
                .json(json!({ "error": "Partida não encontrada" }));
        }
        Err(e) => {
            tracing::error!("Error fetching fixture {}: {}", payload.fixture_id, e);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Erro ao verificar partida" }));
        }
    };

    if StatusCategory::from_short(&status) != StatusCategory::Scheduled {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "As apostas já fecharam!" }));
    }

    match prediction_queries::upsert_prediction(
        &pool,
        user_id,
        payload.fixture_id,
        payload.home_score,
        payload.away_score,
    )
    .await
    {
        Ok(prediction) => {
            tracing::info!(
                "Prediction saved: user={}, fixture={}, score={}x{}",
                user_id,
                payload.fixture_id,
                payload.home_score,
                payload.away_score
            );
            HttpResponse::Ok().json(json!({ "success": true, "prediction": prediction }))
        }
        Err(e) => {
            tracing::error!("Error saving prediction: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Erro ao salvar palpite" }))
        }
    }
}

/// The caller's predictions, most recently edited first.
pub async fn get_user_predictions(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => {
            return HttpResponse::Unauthorized()
                .json(json!({ "error": "Usuário não autenticado" }));
        }
    };

    match prediction_queries::predictions_for_user(&pool, user_id).await {
        Ok(predictions) => HttpResponse::Ok().json(predictions),
        Err(e) => {
            tracing::error!("Failed to fetch predictions for user {}: {}", user_id, e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Erro ao buscar palpites" }))
        }
    }
}
