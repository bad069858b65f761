mod app;
mod config;
mod db;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;
mod store;

use std::sync::Arc;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use crate::config::AppConfig;
use crate::external::alphavantage::AlphaVantageClient;
use crate::logging::{init_logging, LoggingConfig};
use crate::state::AppState;
use crate::store::PgOverviewStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    tracing::info!("Using overview provider at {}", config.provider_base_url);
    let state = AppState {
        store: Arc::new(PgOverviewStore::new(pool)),
        provider: Arc::new(AlphaVantageClient::new(config.provider_base_url.clone())),
        api_key: config.api_key.clone(),
    };
    let app = app::create_app(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Stock overview API running at http://{}/", config.bind_addr);
    axum::serve(listener, app)
        .await?;

    Ok(())
}
