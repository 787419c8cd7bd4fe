use crate::{errors::AppError, state::AppState, types::HealthResponse};
use axum::{extract::State, Json};
use samvidhan::providers::db::corpus::CorpusIndex;

/// The root handler.
pub async fn root() -> &'static str {
    "samvidhan server is running."
}

/// The health check handler. Reports the corpus article count so probes can
/// tell an empty deployment from a seeded one.
pub async fn health_check(
    State(app_state): State<AppState>,
) -> Result<Json<HealthResponse>, AppError> {
    let corpus_articles = app_state.corpus.count_articles().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        corpus_articles,
    }))
}
