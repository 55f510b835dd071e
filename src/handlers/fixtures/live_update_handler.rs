use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::config::settings::FootballApiSettings;
use crate::services::{FootballApiClient, LiveUpdateService};

/// Trigger one live-update sweep over imminent and in-progress fixtures.
pub async fn update_live_fixtures(
    pool: web::Data<PgPool>,
    client: web::Data<FootballApiClient>,
    settings: web::Data<FootballApiSettings>,
) -> HttpResponse {
    let service = LiveUpdateService::new(
        pool.get_ref().clone(),
        client.get_ref().clone(),
        settings.lead_window_minutes,
    );

    match service.run_sweep().await {
        Ok(summary) => {
            let message = if summary.checked == 0 {
                "No fixtures to update"
            } else {
                "Fixtures updated successfully"
            };
            HttpResponse::Ok().json(json!({
                "message": message,
                "checked": summary.checked,
                "updated": summary.updated,
                "updatedIds": summary.updated_ids,
            }))
        }
        Err(e) => {
            tracing::error!("Live update sweep failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}
