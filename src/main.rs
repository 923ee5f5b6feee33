use std::sync::Arc;
use std::time::Duration;

use campus_api::clients::SchoolClient;
use campus_api::config::AppConfig;
use campus_api::database::Stores;
use campus_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let stores = Stores::connect(&config.database).await?;

    // The school lookup defaults to this process's own listen address;
    // a split deployment points it elsewhere via SCHOOL_SERVICE_URL.
    let school_base = config
        .school_service
        .base_url
        .clone()
        .unwrap_or_else(|| format!("http://127.0.0.1:{}", config.http.port));
    let school_client = SchoolClient::new(
        school_base,
        Duration::from_secs(config.school_service.timeout_secs),
    )?;

    let bind_addr = format!("0.0.0.0:{}", config.http.port);
    let state = AppState {
        config: Arc::new(config),
        stores,
        school_client,
    };

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "campus-api listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
