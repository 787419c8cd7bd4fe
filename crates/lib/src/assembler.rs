//! # Prompt Assembly
//!
//! Turns an intent, the original message and any retrieved passages into
//! either a completion request or a fixed local message. The split is a sum
//! type, so the completion gateway is structurally unreachable on the
//! short-circuit paths: exactly one of {external call, fixed message}
//! happens per request.

use crate::classifier::QueryIntent;
use crate::prompts::{
    META_SYSTEM_PROMPT, NO_RESULTS_MESSAGE, OUT_OF_DOMAIN_MESSAGE, RAG_SYSTEM_PROMPT,
    RAG_USER_PROMPT,
};
use crate::types::{GenerationConfig, PromptPayload, RetrievedPassage};

/// The assembler's verdict for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Assembled {
    /// Send this payload to the completion service.
    Call(PromptPayload),
    /// Return this fixed text directly; no external call.
    Fixed(String),
}

/// Assembles the prompt (or fixed message) for a classified message.
pub fn assemble(
    intent: QueryIntent,
    message: &str,
    passages: &[RetrievedPassage],
    generation: &GenerationConfig,
) -> Assembled {
    match intent {
        QueryIntent::Meta => Assembled::Call(PromptPayload {
            system_instruction: META_SYSTEM_PROMPT.replace("{model}", &generation.model),
            user_content: message.to_string(),
            temperature: generation.temperature,
            max_tokens: generation.meta_max_tokens,
            model_id: generation.model.clone(),
        }),
        QueryIntent::InDomain if passages.is_empty() => {
            Assembled::Fixed(NO_RESULTS_MESSAGE.to_string())
        }
        QueryIntent::InDomain => {
            let context = passages
                .iter()
                .map(passage_excerpt)
                .collect::<Vec<String>>()
                .join("\n\n");

            let user_content = RAG_USER_PROMPT
                .replace("{context}", &context)
                .replace("{question}", message);

            Assembled::Call(PromptPayload {
                system_instruction: RAG_SYSTEM_PROMPT.to_string(),
                user_content,
                temperature: generation.temperature,
                max_tokens: generation.rag_max_tokens,
                model_id: generation.model.clone(),
            })
        }
        QueryIntent::OutOfDomain => Assembled::Fixed(OUT_OF_DOMAIN_MESSAGE.to_string()),
    }
}

/// Renders one passage as `"Article {number} ({part}{, chapter}):\n{content}"`.
fn passage_excerpt(passage: &RetrievedPassage) -> String {
    let article = &passage.article;
    let part = if article.part.is_empty() {
        "Part Not Specified"
    } else {
        article.part.as_str()
    };
    let chapter = article
        .chapter
        .as_deref()
        .map(|chapter| format!(", {chapter}"))
        .unwrap_or_default();

    format!(
        "Article {number} ({part}{chapter}):\n{content}",
        number = article.article_number,
        content = article.content.split_whitespace().collect::<Vec<_>>().join(" "),
    )
}
