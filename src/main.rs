use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use bolao_backend::config::settings::{get_config, get_jwt_settings};
use bolao_backend::run;
use bolao_backend::services::{FootballApiClient, SchedulerService};
use bolao_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "bolao-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    // JWT
    let jwt_settings = get_jwt_settings(&config);

    // Client for the external football API
    let api_client = FootballApiClient::new(&config.football_api)
        .expect("Failed to create football API client");

    // Only try to establish connection when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(32)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(
            &config.database.connection_string().expose_secret()
        )
        .expect("Failed to create Postgres connection pool");

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;

    // Initialize the scheduler service for fixture sync and live updates
    let scheduler_service = match SchedulerService::new(
        connection_pool.clone(),
        api_client.clone(),
        config.football_api.clone(),
    )
    .await
    {
        Ok(scheduler) => match scheduler.start().await {
            Ok(_) => {
                tracing::info!("✅ Scheduler service started successfully");
                Arc::new(scheduler)
            }
            Err(e) => {
                tracing::error!("❌ Failed to start scheduler: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            tracing::error!("❌ Failed to create scheduler service: {}", e);
            std::process::exit(1);
        }
    };
    // Jobs keep running for the lifetime of the process
    let _scheduler = scheduler_service;

    run(
        listener,
        connection_pool,
        jwt_settings,
        api_client,
        config.football_api,
    )?
    .await
}
