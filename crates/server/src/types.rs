//! # API Payload Types
//!
//! Request and response bodies for the HTTP surface. The chat wire shape
//! (`response` plus a `context` array of cited articles) matches what the
//! front-end consumes.

use samvidhan::types::ArticleRecord;
use serde::{Deserialize, Serialize};

/// The request body for `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// One cited article in a chat response.
#[derive(Debug, Serialize)]
pub struct CitedArticle {
    /// The article number, under the key the front-end expects.
    #[serde(rename = "article")]
    pub article_number: String,
    pub content: String,
    pub part: String,
    pub chapter: Option<String>,
}

impl From<ArticleRecord> for CitedArticle {
    fn from(record: ArticleRecord) -> Self {
        Self {
            article_number: record.article_number,
            content: record.content,
            part: record.part,
            chapter: record.chapter,
        }
    }
}

/// The response body for `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    /// The articles the answer cites; empty for meta, out-of-domain,
    /// no-result and failure answers.
    pub context: Vec<CitedArticle>,
}

/// The request body for `POST /articles`.
#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub article_number: String,
    pub content: String,
    pub part: String,
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

/// The response body for `POST /corpus/import`.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub imported_articles: usize,
}

/// The response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub corpus_articles: u64,
}
