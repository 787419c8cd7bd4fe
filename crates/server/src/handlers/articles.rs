use crate::{
    errors::AppError,
    state::AppState,
    types::{CreateArticleRequest, ImportResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use samvidhan::providers::db::corpus::CorpusIndex;
use samvidhan::types::{ArticleImport, ArticleRecord};
use tracing::info;

/// The handler for `GET /articles`.
pub async fn list_articles_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ArticleRecord>>, AppError> {
    let articles = app_state.corpus.list_articles().await?;
    Ok(Json(articles))
}

/// The handler for `GET /articles/{number}`.
pub async fn get_article_handler(
    State(app_state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<ArticleRecord>, AppError> {
    let article = app_state
        .corpus
        .get_article(&number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article {number} not found")))?;
    Ok(Json(article))
}

/// The handler for `POST /articles`.
pub async fn create_article_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateArticleRequest>,
) -> Result<(StatusCode, Json<ArticleRecord>), AppError> {
    if payload.article_number.trim().is_empty() || payload.content.trim().is_empty() {
        return Err(AppError::Validation(
            "article_number and content are required".to_string(),
        ));
    }

    let article = ArticleImport {
        article_number: payload.article_number,
        content: payload.content,
        part: payload.part,
        chapter: payload.chapter,
        section: payload.section,
    };
    let stored = app_state.corpus.insert_article(&article).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// The handler for `POST /corpus/import`.
///
/// Accepts a JSON array of articles and stores them, skipping exact
/// duplicates. This is the whole administrative ingestion surface; parsing
/// source documents into this shape happens outside the server.
pub async fn import_corpus_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<Vec<ArticleImport>>,
) -> Result<Json<ImportResponse>, AppError> {
    info!("Received corpus import of {} articles", payload.len());

    let imported = app_state.corpus.import_articles(&payload).await?;

    Ok(Json(ImportResponse {
        message: "Import successful".to_string(),
        imported_articles: imported,
    }))
}
