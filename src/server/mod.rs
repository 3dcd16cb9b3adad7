use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod error;
pub mod routes;
pub mod state;

use crate::infra::ServerConfig;
use routes::{
    clear_api_key_handler, health_handler, influencer_handler, leaderboard_handler,
    read_api_key_handler, read_config_handler, reset_config_handler, save_api_key_handler,
    save_config_handler, search_handler,
};
pub use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route("/search", post(search_handler))
        .route("/i/{influencer}", get(influencer_handler))
        .route("/leaderboard", get(leaderboard_handler))
        .route(
            "/api/session-cookies",
            get(read_api_key_handler)
                .post(save_api_key_handler)
                .delete(clear_api_key_handler),
        )
        .route(
            "/api/config-cookies",
            get(read_config_handler)
                .post(save_config_handler)
                .delete(reset_config_handler),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: ServerConfig) -> Result<()> {
    info!(model = %config.model, "Initializing state...");
    let address = config.address();
    let state = AppState::new(config);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on http://{address}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::SignalKind;

        match signal::unix::signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
