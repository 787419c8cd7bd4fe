//! Shared helpers for the library integration tests.
//!
//! Each test binary compiles this module independently and uses a different
//! subset of it.
#![allow(dead_code)]

use async_trait::async_trait;
use samvidhan::errors::AnswerError;
use samvidhan::providers::ai::CompletionProvider;
use samvidhan::providers::db::corpus::{CorpusIndex, SearchFilter};
use samvidhan::providers::db::sqlite::SqliteCorpusIndex;
use samvidhan::types::{ArticleImport, ArticleRecord, PromptPayload, RetrievedPassage};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();
}

// --- Mock Completion Provider ---

/// One scripted outcome for the mock completion provider.
#[derive(Clone, Debug)]
#[allow(dead_code)]
pub enum MockOutcome {
    Text(String),
    Upstream { status: u16, body: String },
    Timeout,
}

/// A completion provider that replays scripted outcomes in order and records
/// every payload it receives.
#[derive(Clone, Debug)]
pub struct MockCompletionProvider {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    pub calls: Arc<Mutex<Vec<PromptPayload>>>,
}

impl MockCompletionProvider {
    pub fn new(outcomes: Vec<MockOutcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes.into())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[allow(dead_code)]
    pub fn with_text(text: &str) -> Self {
        Self::new(vec![MockOutcome::Text(text.to_string())])
    }

    pub fn recorded_calls(&self) -> Vec<PromptPayload> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, payload: &PromptPayload) -> Result<String, AnswerError> {
        self.calls.lock().unwrap().push(payload.clone());

        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Text(text)) => Ok(text),
            Some(MockOutcome::Upstream { status, body }) => Err(AnswerError::CompletionApi {
                status,
                detail: body,
            }),
            Some(MockOutcome::Timeout) => Err(AnswerError::CompletionTimeout),
            None => Err(AnswerError::CompletionApi {
                status: 500,
                detail: "MockCompletionProvider: no scripted outcome left".to_string(),
            }),
        }
    }
}

// --- Call-Counting Corpus Index ---

/// Wraps a corpus index and counts search calls, so tests can assert that
/// meta and out-of-domain paths never touch the corpus.
#[derive(Debug)]
pub struct CountingCorpusIndex {
    inner: SqliteCorpusIndex,
    search_calls: Arc<AtomicUsize>,
}

impl CountingCorpusIndex {
    pub fn new(inner: SqliteCorpusIndex) -> Self {
        Self {
            inner,
            search_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.search_calls.clone()
    }
}

#[async_trait]
impl CorpusIndex for CountingCorpusIndex {
    async fn search(
        &self,
        text: &str,
        filter: &SearchFilter,
        limit: usize,
    ) -> Result<Vec<RetrievedPassage>, AnswerError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.search(text, filter, limit).await
    }

    async fn list_articles(&self) -> Result<Vec<ArticleRecord>, AnswerError> {
        self.inner.list_articles().await
    }

    async fn get_article(
        &self,
        article_number: &str,
    ) -> Result<Option<ArticleRecord>, AnswerError> {
        self.inner.get_article(article_number).await
    }

    async fn insert_article(&self, article: &ArticleImport) -> Result<ArticleRecord, AnswerError> {
        self.inner.insert_article(article).await
    }

    async fn import_articles(&self, articles: &[ArticleImport]) -> Result<usize, AnswerError> {
        self.inner.import_articles(articles).await
    }

    async fn count_articles(&self) -> Result<u64, AnswerError> {
        self.inner.count_articles().await
    }
}

// --- Corpus Fixture ---

pub fn article(number: &str, content: &str, part: &str, chapter: Option<&str>) -> ArticleImport {
    ArticleImport {
        article_number: number.to_string(),
        content: content.to_string(),
        part: part.to_string(),
        chapter: chapter.map(String::from),
        section: None,
    }
}

/// A small constitution fixture covering Part III rights articles and a few
/// articles from other parts, enough to exercise ranking and part filtering.
pub fn constitution_fixture() -> Vec<ArticleImport> {
    vec![
        article(
            "14",
            "The State shall not deny to any person equality before the law or the equal protection of the laws within the territory of India.",
            "III",
            Some("Right to Equality"),
        ),
        article(
            "19",
            "All citizens shall have the right to freedom of speech and expression, to assemble peaceably and without arms, and to form associations or unions.",
            "III",
            Some("Right to Freedom"),
        ),
        article(
            "21",
            "No person shall be deprived of his life or personal liberty except according to procedure established by law.",
            "III",
            Some("Right to Freedom"),
        ),
        article(
            "32",
            "The right to move the Supreme Court by appropriate proceedings for the enforcement of the rights conferred by this Part is guaranteed.",
            "III",
            Some("Right to Constitutional Remedies"),
        ),
        article(
            "52",
            "There shall be a President of India.",
            "V",
            Some("The Executive"),
        ),
        article(
            "79",
            "There shall be a Parliament for the Union which shall consist of the President and two Houses to be known respectively as the Council of States and the House of the People.",
            "V",
            Some("Parliament"),
        ),
        article(
            "368",
            "Parliament may in exercise of its constituent power amend by way of addition, variation or repeal any provision of this Constitution in accordance with the procedure laid down in this article.",
            "XX",
            None,
        ),
    ]
}

/// Creates an in-memory corpus index seeded with [`constitution_fixture`].
pub async fn seeded_corpus() -> anyhow::Result<SqliteCorpusIndex> {
    let index = SqliteCorpusIndex::new(":memory:").await?;
    index.initialize_schema().await?;
    index.import_articles(&constitution_fixture()).await?;
    Ok(index)
}
