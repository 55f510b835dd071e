use actix_web::web;

pub mod auth;
pub mod backend_health;
pub mod fixtures;
pub mod predictions;
pub mod registration;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(auth::login)
        .service(backend_health::backend_health);

    // Fixture lifecycle: sync + live-update triggers and the read endpoints
    cfg.service(
        web::scope("/fixtures")
            .service(fixtures::sync_fixtures)
            .service(fixtures::update_live_fixtures)
            .service(fixtures::get_upcoming_fixtures)
            .service(fixtures::get_live_fixtures)
            .service(fixtures::get_fixture)
    );

    // Prediction routes (require authentication)
    cfg.service(
        web::scope("/predictions")
            .wrap(AuthMiddleware)
            .service(predictions::save_prediction)
            .service(predictions::get_my_predictions)
    );
}
