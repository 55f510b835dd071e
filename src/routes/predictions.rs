// src/routes/predictions.rs
use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::handlers::prediction_handler;
use crate::middleware::auth::Claims;
use crate::models::prediction::PredictionPayload;

/// Save or overwrite the caller's prediction for a fixture
#[post("")]
async fn save_prediction(
    payload: web::Json<PredictionPayload>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    prediction_handler::save_prediction(payload, pool, claims).await
}

/// The caller's predictions
#[get("/mine")]
async fn get_my_predictions(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    prediction_handler::get_user_predictions(pool, claims).await
}
