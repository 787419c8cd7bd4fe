use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use samvidhan::AnswerError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// Converts pipeline and infrastructure errors into HTTP responses. Upstream
/// error bodies are logged for operators and never echoed to clients.
pub enum AppError {
    /// A request that fails boundary validation (e.g. empty message).
    Validation(String),
    /// A referenced resource does not exist.
    NotFound(String),
    /// Errors originating from the `samvidhan` pipeline or corpus index.
    Answer(AnswerError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<AnswerError> for AppError {
    fn from(err: AnswerError) -> Self {
        match err {
            AnswerError::EmptyMessage => AppError::Validation("Message is required".to_string()),
            other => AppError::Answer(other),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Answer(err) => {
                // Log the original error for debugging; the client gets a
                // generic message.
                error!("AnswerError: {:?}", err);
                let status = match err {
                    AnswerError::CompletionRequest(_)
                    | AnswerError::CompletionTimeout
                    | AnswerError::CompletionApi { .. }
                    | AnswerError::MalformedCompletion(_) => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (
                    status,
                    "An error occurred while processing your request".to_string(),
                )
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
