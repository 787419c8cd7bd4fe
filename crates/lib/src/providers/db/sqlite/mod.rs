//! # SQLite Corpus Index
//!
//! A [`CorpusIndex`] implementation over a local SQLite database using Turso.
//! Candidate rows are fetched with case-insensitive `LIKE` conditions and
//! scored in-process: one point per term occurrence in the content, plus a
//! large bonus for an exact article-number match so that "Article 21" style
//! queries rank the named article first. This approximates the relevance
//! ranking of a full-text engine, which is sufficient for a small, fixed,
//! well-structured corpus where article numbers and legal terms dominate.

pub mod sql;

use crate::{
    errors::AnswerError,
    providers::db::corpus::{CorpusIndex, SearchFilter},
    types::{ArticleImport, ArticleRecord, RetrievedPassage},
};
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use tracing::{debug, info};
use turso::{Database, Value as TursoValue};

/// Query terms shorter than this are noise and dropped.
const MIN_TERM_LEN: usize = 2;

/// The score bonus for a term that exactly equals an article's number.
const ARTICLE_NUMBER_BONUS: f64 = 10.0;

/// Common English words that carry no retrieval signal.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "about", "are", "can", "do", "does", "for", "how", "in", "is", "it", "me",
    "my", "of", "on", "say", "says", "the", "to", "was", "what", "when", "where", "which", "who",
    "why", "with", "you",
];

/// A provider for the article corpus backed by a local SQLite database.
///
/// Holds a `Database` instance managing a connection pool; cloning shares
/// the same underlying database, so one index can serve concurrent requests.
#[derive(Clone)]
pub struct SqliteCorpusIndex {
    /// The Turso database instance. Cloneable and thread-safe.
    pub db: Database,
}

impl Debug for SqliteCorpusIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCorpusIndex").finish_non_exhaustive()
    }
}

impl SqliteCorpusIndex {
    /// Creates a new index from a file path, or ":memory:" for an isolated
    /// in-memory database (share one across test helpers by cloning).
    pub async fn new(db_path: &str) -> Result<Self, AnswerError> {
        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| AnswerError::CorpusConnection(e.to_string()))?;

        // WAL mode improves concurrency for file-based databases and is a
        // no-op for in-memory ones. PRAGMA returns a row, so use `query`.
        let conn = db
            .connect()
            .map_err(|e| AnswerError::CorpusConnection(e.to_string()))?;
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| AnswerError::CorpusConnection(e.to_string()))?;

        Ok(Self { db })
    }

    /// Ensures the articles table and its unique index exist. Idempotent;
    /// called on every startup.
    pub async fn initialize_schema(&self) -> Result<(), AnswerError> {
        let conn = self.db.connect()?;
        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ()).await?;
        }
        Ok(())
    }
}

/// Lower-cases and tokenizes a search query, dropping stopwords and noise.
fn query_terms(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| term.len() >= MIN_TERM_LEN && !STOPWORDS.contains(term))
        .map(String::from)
        .collect();
    terms.sort();
    terms.dedup();
    terms
}

/// Scores one article against the query terms.
fn score_article(article: &ArticleRecord, terms: &[String]) -> f64 {
    let content = article.content.to_lowercase();
    let number = article.article_number.to_lowercase();

    let mut score = 0.0;
    for term in terms {
        score += content.matches(term.as_str()).count() as f64;
        if number == *term {
            score += ARTICLE_NUMBER_BONUS;
        }
    }
    score
}

/// Decodes one row produced with [`sql::ARTICLE_COLUMNS`].
fn row_to_article(row: &turso::Row) -> Result<ArticleRecord, AnswerError> {
    let text_at = |index: usize| -> Result<String, AnswerError> {
        match row.get_value(index)? {
            TursoValue::Text(s) => Ok(s),
            _ => Ok(String::new()),
        }
    };
    let optional_text_at = |index: usize| -> Result<Option<String>, AnswerError> {
        match row.get_value(index)? {
            TursoValue::Text(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    };
    let id = match row.get_value(0)? {
        TursoValue::Integer(i) => i,
        _ => 0,
    };

    Ok(ArticleRecord {
        id,
        article_number: text_at(1)?,
        content: text_at(2)?,
        part: text_at(3)?,
        chapter: optional_text_at(4)?,
        section: optional_text_at(5)?,
    })
}

#[async_trait]
impl CorpusIndex for SqliteCorpusIndex {
    async fn search(
        &self,
        text: &str,
        filter: &SearchFilter,
        limit: usize,
    ) -> Result<Vec<RetrievedPassage>, AnswerError> {
        let terms = query_terms(text);
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        info!(?terms, part = ?filter.part, "Executing corpus search");

        let mut term_conditions = Vec::new();
        let mut params: Vec<TursoValue> = Vec::new();
        for term in &terms {
            term_conditions.push("(LOWER(content) LIKE ? OR LOWER(article_number) = ?)");
            params.push(TursoValue::Text(format!("%{term}%")));
            params.push(TursoValue::Text(term.clone()));
        }

        let mut conditions = vec![format!("({})", term_conditions.join(" OR "))];
        if let Some(part) = &filter.part {
            conditions.push("part = ?".to_string());
            params.push(TursoValue::Text(part.clone()));
        }

        let query = format!(
            "SELECT {} FROM articles WHERE {}",
            sql::ARTICLE_COLUMNS,
            conditions.join(" AND ")
        );

        let conn = self.db.connect()?;
        let mut rows = conn.query(&query, params).await?;

        let mut passages = Vec::new();
        while let Some(row) = rows.next().await? {
            let article = row_to_article(&row)?;
            let score = score_article(&article, &terms);
            if score > 0.0 {
                passages.push(RetrievedPassage { article, score });
            }
        }

        // Descending by score; ties break on article number so repeated runs
        // over an unchanged corpus are deterministic.
        passages.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.article.article_number.cmp(&b.article.article_number))
        });
        passages.truncate(limit);

        debug!(count = passages.len(), "Corpus search complete");
        Ok(passages)
    }

    async fn list_articles(&self) -> Result<Vec<ArticleRecord>, AnswerError> {
        let conn = self.db.connect()?;
        let query = format!(
            "SELECT {} FROM articles ORDER BY article_number",
            sql::ARTICLE_COLUMNS
        );
        let mut rows = conn.query(&query, ()).await?;

        let mut articles = Vec::new();
        while let Some(row) = rows.next().await? {
            articles.push(row_to_article(&row)?);
        }
        Ok(articles)
    }

    async fn get_article(
        &self,
        article_number: &str,
    ) -> Result<Option<ArticleRecord>, AnswerError> {
        let conn = self.db.connect()?;
        let query = format!(
            "SELECT {} FROM articles WHERE article_number = ? LIMIT 1",
            sql::ARTICLE_COLUMNS
        );
        let mut rows = conn
            .query(&query, vec![TursoValue::Text(article_number.to_string())])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(row_to_article(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert_article(&self, article: &ArticleImport) -> Result<ArticleRecord, AnswerError> {
        let conn = self.db.connect()?;
        conn.execute(
            "INSERT INTO articles (article_number, content, part, chapter, section, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            vec![
                TursoValue::Text(article.article_number.clone()),
                TursoValue::Text(article.content.clone()),
                TursoValue::Text(article.part.clone()),
                article
                    .chapter
                    .clone()
                    .map_or(TursoValue::Null, TursoValue::Text),
                article
                    .section
                    .clone()
                    .map_or(TursoValue::Null, TursoValue::Text),
                TursoValue::Text(Utc::now().to_rfc3339()),
            ],
        )
        .await?;

        // The unique index makes the pair a reliable lookup key.
        let query = format!(
            "SELECT {} FROM articles WHERE article_number = ? AND content = ? LIMIT 1",
            sql::ARTICLE_COLUMNS
        );
        let mut rows = conn
            .query(
                &query,
                vec![
                    TursoValue::Text(article.article_number.clone()),
                    TursoValue::Text(article.content.clone()),
                ],
            )
            .await?;

        match rows.next().await? {
            Some(row) => row_to_article(&row),
            None => Err(AnswerError::CorpusConnection(
                "inserted article not found".to_string(),
            )),
        }
    }

    async fn import_articles(&self, articles: &[ArticleImport]) -> Result<usize, AnswerError> {
        let conn = self.db.connect()?;
        let mut imported = 0usize;
        for article in articles {
            let changed = conn
                .execute(
                    "INSERT OR IGNORE INTO articles
                     (article_number, content, part, chapter, section, created_at)
                     VALUES (?, ?, ?, ?, ?, ?)",
                    vec![
                        TursoValue::Text(article.article_number.clone()),
                        TursoValue::Text(article.content.clone()),
                        TursoValue::Text(article.part.clone()),
                        article
                            .chapter
                            .clone()
                            .map_or(TursoValue::Null, TursoValue::Text),
                        article
                            .section
                            .clone()
                            .map_or(TursoValue::Null, TursoValue::Text),
                        TursoValue::Text(Utc::now().to_rfc3339()),
                    ],
                )
                .await?;
            imported += changed as usize;
        }
        info!(imported, total = articles.len(), "Corpus import complete");
        Ok(imported)
    }

    async fn count_articles(&self) -> Result<u64, AnswerError> {
        let conn = self.db.connect()?;
        let mut rows = conn.query("SELECT COUNT(*) FROM articles", ()).await?;
        match rows.next().await? {
            Some(row) => match row.get_value(0)? {
                TursoValue::Integer(count) => Ok(count as u64),
                _ => Ok(0),
            },
            None => Ok(0),
        }
    }
}
