use once_cell::sync::Lazy;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use uuid::Uuid;

use bolao_backend::config::settings::{get_config, get_jwt_settings, DatabaseSettings};
use bolao_backend::run;
use bolao_backend::services::FootballApiClient;
use bolao_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

/// Spin up the app without a usable upstream; tests that never trigger a
/// sync or sweep don't care where the API points.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_api("http://127.0.0.1:1", "test-key").await
}

/// Spin up the app with the football API base URL pointed at a mock server.
pub async fn spawn_app_with_football_api(api_base_url: &str) -> TestApp {
    spawn_app_with_api(api_base_url, "test-key").await
}

/// Spin up the app with no API key configured.
pub async fn spawn_app_without_api_key() -> TestApp {
    spawn_app_with_api("http://127.0.0.1:1", "").await
}

async fn spawn_app_with_api(api_base_url: &str, api_key: &str) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    // Each test gets its own database; never reuse an ambient DATABASE_URL
    configuration.database.db_url = None;
    configuration.football_api.base_url = api_base_url.to_string();
    configuration.football_api.key =
        SecretString::new(api_key.to_string().into_boxed_str());

    let connection_pool = configure_db(&configuration.database).await;
    let jwt_settings = get_jwt_settings(&configuration);
    let api_client = FootballApiClient::new(&configuration.football_api)
        .expect("Failed to create football API client");

    let server = run(
        listener,
        connection_pool.clone(),
        jwt_settings,
        api_client,
        configuration.football_api.clone(),
    )
    .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(&config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Register a fresh user and log in. Returns (username, bearer token).
pub async fn create_test_user_and_login(app_address: &str) -> (String, String) {
    let client = Client::new();
    let username = format!("palpiteiro{}", Uuid::new_v4());
    let password = "password123";
    let email = format!("{}@example.com", username);

    let user_request = json!({
        "username": username,
        "password": password,
        "email": email
    });

    let register_response = client
        .post(&format!("{}/register_user", app_address))
        .json(&user_request)
        .send()
        .await
        .expect("Failed to register user.");
    assert!(register_response.status().is_success(), "User registration should succeed");

    let login_request = json!({
        "username": username,
        "password": password
    });

    let login_response = client
        .post(&format!("{}/login", app_address))
        .json(&login_request)
        .send()
        .await
        .expect("Failed to login.");
    assert!(login_response.status().is_success(), "Login should succeed");

    let login_json = login_response.json::<serde_json::Value>().await
        .expect("Failed to parse login response");
    let token = login_json["token"].as_str().expect("Token not found").to_string();

    (username, token)
}
