pub mod browse;
pub mod catalog;
pub mod config;
pub mod db;
pub mod middleware;
pub mod pages;
pub mod server;
pub mod session;
pub mod util;
pub mod watchlist;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::ServiceExt;
use tower::Layer;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),
    #[error("Session error: {0}")]
    Session(#[from] session::SessionError),
    #[error("Watchlist error: {0}")]
    Watchlist(#[from] watchlist::WatchlistError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: &str, debug_logs: bool) -> Result<(), ServerError> {
    let mut config = config::Config::from_file(config_path)?;
    config.debug_logs = debug_logs;

    info!("Using config file: {}", config_path);
    if debug_logs {
        info!("Debug logging enabled");
    }

    let db_path = config
        .get_database_path()
        .ok_or_else(|| ServerError::Server("No database path configured".to_string()))?;

    info!("Opening database at {}", db_path);
    let storage: Arc<dyn db::KeyValueRepo> = Arc::new(db::SqliteRepository::new(&db_path).await?);

    let session = Arc::new(
        session::SessionStore::open(storage.clone(), config.session.simulated_delay()).await?,
    );
    let current_user = session.current().await;
    let watchlist =
        Arc::new(watchlist::WatchlistStore::open(storage, current_user.as_ref()).await?);

    info!("Using catalog at {}", config.tmdb.base_url);
    let catalog = Arc::new(catalog::TmdbClient::new(&config.tmdb)?);

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let state = server::AppState::new(config, catalog, session, watchlist);
    let router = server::build_router(state);
    // Paths are rewritten before routing sees them.
    let app = axum::middleware::from_fn(middleware::normalize_path).layer(router);

    info!("Serving HTTP on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, ServiceExt::<axum::extract::Request>::into_make_service(app))
        .await
        .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
