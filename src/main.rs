// src/main.rs
use academic_records::{
    build_app, config::AppConfig, create_session_store, db, services::seed_service,
    shutdown::shutdown_signal, state::AppState,
};
use tokio::net::TcpListener;
use tower_sessions::ExpiredDeletion;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "academic_records=debug,tower_http=info,sqlx=warn,tower_sessions=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Logging ---
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Starting academic records server...");

    let config = AppConfig::from_env()?;

    // --- Database ---
    let db_pool = match db::create_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Database initialization failed: {}", e);
            return Err(anyhow::anyhow!("failed to connect/migrate database: {e}"));
        }
    };

    if config.seed_demo_data && seed_service::seed_demo_data(&db_pool, config.bcrypt_cost).await? {
        tracing::info!("🌱 Demo data seeded.");
    }

    // --- Sessions ---
    let session_store = create_session_store(db_pool.clone()).await?;
    let cleanup_store = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = cleanup_store
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Session cleanup task failed: {:?}", e);
        }
    });
    tracing::info!("🧹 Session cleanup task started.");

    // --- Listener ---
    let addr = config.bind_addr;
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Failed to bind {}: {}", addr, e);
            return Err(e.into());
        }
    };

    let app = build_app(AppState::new(db_pool, config), session_store);
    tracing::info!("✅ Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped.");
    Ok(())
}
