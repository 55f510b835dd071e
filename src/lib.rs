use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{web, App, HttpResponse, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub mod config;
pub mod db;
mod handlers;
mod middleware;
pub mod models;
mod routes;
pub mod services;
pub mod telemetry;
pub mod utils;

use crate::config::jwt::JwtSettings;
use crate::config::settings::FootballApiSettings;
use crate::routes::init_routes;
use crate::services::FootballApiClient;

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    jwt_settings: JwtSettings,
    api_client: FootballApiClient,
    api_settings: FootballApiSettings,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool.clone());
    let jwt_settings = web::Data::new(jwt_settings);
    let api_client = web::Data::new(api_client);
    let api_settings = web::Data::new(api_settings);

    let server = HttpServer::new(move || {
        // The original clients are browsers on arbitrary hosts
        let cors = Cors::permissive();

        // A body that fails to deserialize must surface the gateway's
        // malformed-payload contract instead of actix's default error page
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": "Dados inválidos" })),
            )
            .into()
        });

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Get a pointer copy and attach it to the application state
            .app_data(db_pool_data.clone())
            .app_data(jwt_settings.clone())
            .app_data(api_client.clone())
            .app_data(api_settings.clone())
            .app_data(json_config)
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
