use thiserror::Error;

/// Custom error types for the answer pipeline.
#[derive(Error, Debug)]
pub enum AnswerError {
    #[error("Message must not be empty")]
    EmptyMessage,
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Request to completion service failed: {0}")]
    CompletionRequest(reqwest::Error),
    #[error("Completion service did not respond within the configured timeout")]
    CompletionTimeout,
    #[error("Completion service returned status {status}: {detail}")]
    CompletionApi { status: u16, detail: String },
    #[error("Completion response is missing the expected content: {0}")]
    MalformedCompletion(String),
    #[error("Corpus index error: {0}")]
    Retrieval(#[from] turso::Error),
    #[error("Corpus connection error: {0}")]
    CorpusConnection(String),
    #[error("Completion API key is missing")]
    MissingApiKey,
    #[error("Answer engine is missing a completion provider")]
    MissingCompletionProvider,
    #[error("Answer engine is missing a corpus index")]
    MissingCorpusIndex,
}

impl AnswerError {
    /// Whether a failed completion attempt is worth retrying.
    ///
    /// Covers connect errors, timeouts, rate limiting and upstream 5xx. A 4xx
    /// other than 429 means the request itself is bad and will not improve.
    pub fn is_transient(&self) -> bool {
        match self {
            AnswerError::CompletionTimeout => true,
            AnswerError::CompletionRequest(e) => e.is_connect() || e.is_timeout(),
            AnswerError::CompletionApi { status, .. } => {
                *status == 429 || (500..600).contains(status)
            }
            _ => false,
        }
    }
}
