// src/lib.rs
pub mod config;
pub mod db;
pub mod error;
pub mod gpa;
pub mod models;
pub mod services;
pub mod shutdown;
pub mod state;
pub mod templates;
pub mod web;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};
use axum::Router;
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

/// Session store backed by the application's own database.
pub async fn create_session_store(db_pool: SqlitePool) -> AppResult<SqliteStore> {
    let store = SqliteStore::new(db_pool)
        .with_table_name("sessions")
        .map_err(|e| AppError::SessionError(format!("invalid session table name: {e}")))?;
    store.migrate().await?;
    Ok(store)
}

/// The full application: routes plus tracing and session layers.
pub fn build_app(app_state: AppState, session_store: SqliteStore) -> Router {
    let inactivity = time::Duration::hours(app_state.config.session_inactivity_hours);
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(inactivity));

    web::routes::create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer),
    )
}
