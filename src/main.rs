//! Process bootstrap: config, pool, schema sync, routes, listener.

use axum::http::HeaderValue;
use consultants_api::{app_router, AppConfig, AppState, ConsultantStore};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("consultants_api=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Lazy pool: the server starts even when the database is down.
    let pool = config
        .db
        .pool_options()
        .connect_lazy_with(config.db.connect_options());

    match ConsultantStore::sync_schema(&pool).await {
        Ok(()) => tracing::info!("Synced db."),
        Err(err) => tracing::error!("Failed to sync db: {}", err),
    }

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8081".parse::<HeaderValue>()?)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = app_router(AppState { pool }).layer(cors);

    let listener = TcpListener::bind(("0.0.0.0", config.listen_port)).await?;
    tracing::info!("Server is running on http://localhost:{}", config.listen_port);
    axum::serve(listener, app).await?;
    Ok(())
}
