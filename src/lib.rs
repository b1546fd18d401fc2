pub mod about;
pub mod appresult;
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod feed;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod posts;
pub mod res;
pub mod session;

use std::{future::Future, io, sync::Arc};

use axum::{extract::FromRef, routing::get, Router};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

pub use appresult::{AppError, AppResult};
pub use cache::{LruPageCache, PageCache};
pub use config::Config;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub cache: Arc<dyn PageCache>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: Config) -> Self {
        let cache = Arc::new(LruPageCache::new(config.page_cache_capacity));
        AppState {
            db_pool,
            cache,
            config: Arc::new(config),
        }
    }
}

/// Builds the full application: routes, sessions and request tracing.
pub fn app(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(state.config.session_inactivity));

    Router::new()
        .merge(posts::router())
        .nest("/auth", auth::router())
        .nest("/about", about::router())
        .route("/static/style.css", get(res::stylesheet))
        .fallback(res::not_found)
        .with_state(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}

/// Resolves once `signal` fires. A signal that can't be listened for is
/// logged and treated as a request to stop.
pub async fn shutdown_on(signal: impl Future<Output = io::Result<()>>) {
    match signal.await {
        Ok(()) => tracing::info!("shutting down"),
        Err(err) => tracing::error!("couldn't listen for the shutdown signal: {err}"),
    }
}
