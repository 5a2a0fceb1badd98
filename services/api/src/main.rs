use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod event_log;
mod middleware;
mod models;
mod notes;
mod oauth;
mod routes;
mod session;
mod state;
mod youtube;

use common::cache::{RedisConfig, RedisPool};
use common::database::{DatabaseConfig, init_pool};
use tokio::net::TcpListener;

use crate::{
    config::AppConfig, event_log::EventLogger, notes::NotesStore, oauth::OAuthClient,
    session::SessionStore, state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting YouTube console API service");

    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize Redis connection for the session store
    let redis_config = RedisConfig::from_env()?;
    let redis_pool = RedisPool::new(&redis_config).await?;

    let event_log = EventLogger::new(pool);
    event_log.ensure_schema().await?;

    let http = reqwest::Client::new();
    let oauth = OAuthClient::new_google(&config, http.clone())?;
    let sessions = SessionStore::new(redis_pool, config.session_ttl_seconds);
    let notes = NotesStore::new();

    info!("API service initialized successfully");

    let port = config.port;
    let app_state = AppState {
        config,
        oauth,
        sessions,
        event_log,
        notes,
        http,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("API service listening on 0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
