use crate::{
    errors::AppError,
    state::AppState,
    types::{ChatRequest, ChatResponse},
};
use axum::{extract::State, Json};
use tracing::info;

/// The handler for `POST /chat`.
///
/// Runs the answer pipeline for one message. An empty message is rejected
/// with 400 before the pipeline runs; every other outcome (including
/// upstream failures, already translated to fixed fallback text inside the
/// pipeline) is a 200 with the answer and its cited articles.
pub async fn chat_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    info!("Received chat message: '{}'", payload.message);

    let answer = app_state.engine.answer(&payload.message).await?;

    Ok(Json(ChatResponse {
        response: answer.text,
        context: answer.used_passages.into_iter().map(Into::into).collect(),
    }))
}
