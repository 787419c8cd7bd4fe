use crate::errors::AnswerError;
use crate::types::{ArticleImport, ArticleRecord, RetrievedPassage};
use async_trait::async_trait;
use std::fmt::Debug;

/// An optional narrowing of a corpus search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Restrict matches to articles in this part (e.g. "III").
    pub part: Option<String>,
}

/// A trait for the searchable store of constitutional articles.
///
/// The pipeline performs no writes through `search`; the import and insert
/// operations exist for the article routes and the corpus bootstrap. Results
/// from `search` are sorted descending by relevance score and capped at
/// `limit`.
#[async_trait]
pub trait CorpusIndex: Send + Sync + Debug {
    /// Relevance-scored text search over article content and numbers.
    async fn search(
        &self,
        text: &str,
        filter: &SearchFilter,
        limit: usize,
    ) -> Result<Vec<RetrievedPassage>, AnswerError>;

    /// All articles, ordered by article number.
    async fn list_articles(&self) -> Result<Vec<ArticleRecord>, AnswerError>;

    /// Looks up a single article by its number.
    async fn get_article(&self, article_number: &str) -> Result<Option<ArticleRecord>, AnswerError>;

    /// Inserts one article and returns the stored record.
    async fn insert_article(&self, article: &ArticleImport) -> Result<ArticleRecord, AnswerError>;

    /// Imports a batch of articles, skipping exact duplicates. Returns the
    /// number of newly stored articles.
    async fn import_articles(&self, articles: &[ArticleImport]) -> Result<usize, AnswerError>;

    /// The number of articles currently stored.
    async fn count_articles(&self) -> Result<u64, AnswerError>;
}
