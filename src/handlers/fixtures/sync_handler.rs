use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::config::settings::FootballApiSettings;
use crate::services::{FixtureSyncService, FootballApiClient};

/// Trigger a sync of the upcoming-fixtures window. No caller input: team,
/// season and window size come from configuration.
pub async fn sync_fixtures(
    pool: web::Data<PgPool>,
    client: web::Data<FootballApiClient>,
    settings: web::Data<FootballApiSettings>,
) -> HttpResponse {
    let service = FixtureSyncService::new(
        pool.get_ref().clone(),
        client.get_ref().clone(),
        settings.get_ref(),
    );

    match service.sync().await {
        Ok(summary) if summary.synced == 0 => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "No fixtures to sync",
            "synced": 0,
        })),
        Ok(summary) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": format!("Synced {} fixtures", summary.synced),
            "synced": summary.synced,
            "fixtures": summary.fixtures,
        })),
        Err(e) => {
            tracing::error!("Fixture sync failed: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": e.to_string(),
            }))
        }
    }
}
