use crate::classifier::ClassifierConfig;
use crate::errors::AnswerError;
use crate::providers::{ai::CompletionProvider, db::corpus::CorpusIndex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A single article of the Constitution, as stored in the corpus index.
///
/// Records are read-only to the pipeline; the `(article_number, content)`
/// pair is unique within the corpus and `content` arrives pre-normalized
/// (single spaces, no embedded newlines) from the import path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: i64,
    pub article_number: String,
    pub content: String,
    pub part: String,
    pub chapter: Option<String>,
    pub section: Option<String>,
}

/// An article plus its relevance score, scoped to a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedPassage {
    pub article: ArticleRecord,
    pub score: f64,
}

/// The fields accepted when inserting or importing an article.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleImport {
    pub article_number: String,
    pub content: String,
    pub part: String,
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

/// A fully assembled completion request. Immutable once built and consumed
/// exactly once by the completion provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPayload {
    pub system_instruction: String,
    pub user_content: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub model_id: String,
}

/// The pipeline's final product: the answer text plus the articles it cited.
///
/// `used_passages` is empty for meta, out-of-domain, no-result and failure
/// answers; it carries the retrieved articles for successful in-domain
/// answers so the caller can render citations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub text: String,
    pub used_passages: Vec<ArticleRecord>,
}

impl Answer {
    /// An answer consisting of fixed text with no supporting passages.
    pub(crate) fn fixed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            used_passages: Vec::new(),
        }
    }
}

/// Tunable generation settings shared by all prompt assemblies.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// The completion model id sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Token budget for meta answers, which are short explanatory text.
    #[serde(default = "default_meta_max_tokens")]
    pub meta_max_tokens: u32,
    /// Token budget for in-domain answers, which are structured multi-point text.
    #[serde(default = "default_rag_max_tokens")]
    pub rag_max_tokens: u32,
}

fn default_model() -> String {
    "mistralai/mistral-7b-instruct".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_meta_max_tokens() -> u32 {
    400
}

fn default_rag_max_tokens() -> u32 {
    800
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            meta_max_tokens: default_meta_max_tokens(),
            rag_max_tokens: default_rag_max_tokens(),
        }
    }
}

/// The answer pipeline: classification, retrieval, prompt assembly,
/// completion and formatting behind a single `answer` entry point.
///
/// Holds no per-request state; every call runs the full pipeline from
/// scratch, so one engine can serve concurrent requests.
pub struct AnswerEngine {
    pub(crate) completion_provider: Box<dyn CompletionProvider>,
    pub(crate) corpus_index: Arc<dyn CorpusIndex>,
    pub(crate) classifier: ClassifierConfig,
    pub(crate) generation: GenerationConfig,
}

impl fmt::Debug for AnswerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerEngine")
            .field("model", &self.generation.model)
            .finish_non_exhaustive()
    }
}

/// A builder for creating `AnswerEngine` instances.
///
/// The completion provider and corpus index are required; classifier phrase
/// lists and generation settings fall back to the built-in defaults.
#[derive(Default)]
pub struct AnswerEngineBuilder {
    completion_provider: Option<Box<dyn CompletionProvider>>,
    corpus_index: Option<Arc<dyn CorpusIndex>>,
    classifier: Option<ClassifierConfig>,
    generation: Option<GenerationConfig>,
}

impl AnswerEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the completion provider (e.g. `OpenRouterProvider`).
    pub fn completion_provider(mut self, provider: Box<dyn CompletionProvider>) -> Self {
        self.completion_provider = Some(provider);
        self
    }

    /// Sets the corpus index the retriever searches.
    pub fn corpus_index(mut self, index: Arc<dyn CorpusIndex>) -> Self {
        self.corpus_index = Some(index);
        self
    }

    /// Overrides the classifier phrase lists.
    pub fn classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Overrides the generation settings.
    pub fn generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Builds the `AnswerEngine`, failing if a required collaborator is missing.
    pub fn build(self) -> Result<AnswerEngine, AnswerError> {
        Ok(AnswerEngine {
            completion_provider: self
                .completion_provider
                .ok_or(AnswerError::MissingCompletionProvider)?,
            corpus_index: self.corpus_index.ok_or(AnswerError::MissingCorpusIndex)?,
            classifier: self.classifier.unwrap_or_default(),
            generation: self.generation.unwrap_or_default(),
        })
    }
}
