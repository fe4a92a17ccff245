use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::chat::ChatService;

pub mod routes;

/// Server state
pub struct AppState {
    pub service: Arc<ChatService>,
}

/// Routes: `POST /chat`, `GET /health`
pub fn router(service: Arc<ChatService>) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/chat", post(routes::chat))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, service: Arc<ChatService>) -> anyhow::Result<()> {
    let app = router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
