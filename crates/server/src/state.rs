//! # Application State
//!
//! Defines the shared application state (`AppState`) and the startup logic
//! that builds it: corpus index connection and schema, optional corpus
//! seeding, completion provider instantiation, and the answer engine wiring
//! them together.

use crate::config::AppConfig;
use anyhow::Context;
use samvidhan::providers::ai::openrouter::OpenRouterProvider;
use samvidhan::providers::db::corpus::CorpusIndex;
use samvidhan::providers::db::sqlite::SqliteCorpusIndex;
use samvidhan::types::ArticleImport;
use samvidhan::{AnswerEngine, AnswerEngineBuilder};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The answer pipeline.
    pub engine: Arc<AnswerEngine>,
    /// The corpus index, used directly by the article and import routes.
    pub corpus: Arc<SqliteCorpusIndex>,
}

/// Builds the shared application state from the configuration.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let corpus = SqliteCorpusIndex::new(&config.db_url).await?;
    corpus.initialize_schema().await?;
    info!(db_path = %config.db_url, "Initialized corpus index (SQLite).");

    if let Some(path) = &config.corpus_file {
        seed_corpus_if_empty(&corpus, path).await?;
    }

    let provider = OpenRouterProvider::new(config.completion.clone())?;
    let corpus = Arc::new(corpus);

    let engine = AnswerEngineBuilder::new()
        .completion_provider(Box::new(provider))
        .corpus_index(corpus.clone())
        .classifier(config.classifier.clone())
        .generation(config.generation.clone())
        .build()?;

    Ok(AppState {
        config: Arc::new(config),
        engine: Arc::new(engine),
        corpus,
    })
}

/// Loads a JSON article file into the corpus if the corpus is empty.
///
/// Lets a fresh deployment come up with the constitution already loaded;
/// a populated corpus is left untouched.
async fn seed_corpus_if_empty(corpus: &SqliteCorpusIndex, path: &str) -> anyhow::Result<()> {
    if corpus.count_articles().await? > 0 {
        info!("Corpus already populated, skipping seed file '{path}'.");
        return Ok(());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file '{path}'"))?;
    let articles: Vec<ArticleImport> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse corpus file '{path}'"))?;

    let imported = corpus.import_articles(&articles).await?;
    info!(imported, "Seeded corpus from '{path}'.");
    Ok(())
}
