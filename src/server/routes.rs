use axum::{
    extract::State,
    Json,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use crate::server::AppState;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(error: impl ToString) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: error.to_string() }))
}

/// Answer one question; match and no-match are both 200
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let question = request.question.unwrap_or_default();
    let service = state.service.clone();

    // Embedding, search and the sheet write are all blocking.
    let answer = tokio::task::spawn_blocking(move || service.answer(&question))
        .await
        .map_err(internal)?
        .map_err(|e| {
            tracing::error!("Failed to answer question: {}", e);
            internal(e)
        })?;

    Ok(Json(ChatResponse { answer }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let service = state.service.clone();
    let log_connected = tokio::task::spawn_blocking(move || service.log().is_connected())
        .await
        .unwrap_or(false);

    Json(serde_json::json!({
        "status": "ok",
        "corpus_size": state.service.corpus().len(),
        "log_connected": log_connected,
    }))
}
