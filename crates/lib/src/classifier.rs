//! # Query Classification
//!
//! Routes an incoming message to one of three intents before any retrieval
//! or completion work happens. Classification is pure, deterministic,
//! case-insensitive substring matching against two configurable phrase lists.

use serde::Deserialize;

/// The three-way routing decision made for every incoming message.
///
/// Matched exhaustively by every downstream stage, so adding an intent forces
/// a review of all consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    /// A question about the chatbot itself ("how do you work").
    Meta,
    /// A question that looks constitutional or legal/procedural.
    InDomain,
    /// Anything else; answered with a fixed fallback, no external calls.
    OutOfDomain,
}

/// The phrase lists driving classification.
///
/// Both lists are data, not code: the server config can replace either one
/// without touching pipeline logic. Matching is on the lower-cased message,
/// so entries must be lower-case.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Self-referential phrases; any hit classifies the message as `Meta`.
    #[serde(default = "default_meta_phrases")]
    pub meta_phrases: Vec<String>,
    /// Constitutional and legal/procedural vocabulary; any hit classifies
    /// the message as `InDomain` (unless a meta phrase matched first).
    #[serde(default = "default_domain_keywords")]
    pub domain_keywords: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            meta_phrases: default_meta_phrases(),
            domain_keywords: default_domain_keywords(),
        }
    }
}

fn default_meta_phrases() -> Vec<String> {
    [
        "how do you work",
        "how does this chatbot work",
        "what is your backend",
        "how are you built",
        "tell me about yourself",
        "which ai model",
        "what model do you use",
        "do you use llama",
        "do you use gemini",
        "what ai do you use",
        "what language model",
        "what llm",
        "what technology",
        "what system",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_domain_keywords() -> Vec<String> {
    [
        "constitution",
        "article",
        "fundamental",
        "rights",
        "duties",
        "amendment",
        "parliament",
        "president",
        "supreme court",
        "high court",
        "directive principles",
        "preamble",
        "citizenship",
        "emergency",
        "governor",
        "minister",
        "lok sabha",
        "rajya sabha",
        "bill",
        "law",
        "legislative",
        "executive",
        "judicial",
        "police",
        "crime",
        "rob",
        "steal",
        "theft",
        "file",
        "complaint",
        "legal",
        "procedure",
        "court",
        "justice",
        "lawyer",
        "advocate",
        "criminal",
        "civil",
        "case",
        "fir",
        "first information report",
        "right",
        "protection",
        "security",
        "safety",
        "punishment",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Classifies a message into a [`QueryIntent`].
///
/// The meta check runs first: a message matching both lists is `Meta`.
/// Empty messages are rejected at the boundary and never reach this function.
pub fn classify(config: &ClassifierConfig, message: &str) -> QueryIntent {
    let message = message.to_lowercase();

    if config
        .meta_phrases
        .iter()
        .any(|phrase| message.contains(phrase.as_str()))
    {
        return QueryIntent::Meta;
    }

    if config
        .domain_keywords
        .iter()
        .any(|keyword| message.contains(keyword.as_str()))
    {
        return QueryIntent::InDomain;
    }

    QueryIntent::OutOfDomain
}
