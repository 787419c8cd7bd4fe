//! # Response Formatting
//!
//! The last pipeline stage: wraps meta answers in their fixed framing and
//! passes in-domain answers through unchanged. Failure translation lives in
//! the orchestrator, which always substitutes the one generic failure
//! message; this module never mixes model output with failure text.

use crate::prompts::{META_ANSWER_CLOSER, META_ANSWER_OPENER};

/// Wraps the model's explanation of the chatbot in the fixed meta framing.
pub fn format_meta_answer(model_text: &str, model_id: &str) -> String {
    let closer = META_ANSWER_CLOSER.replace("{model}", model_id);
    format!("{META_ANSWER_OPENER}\n\n{model_text}\n\n{closer}")
}

/// In-domain answers are already markdown-structured by construction and are
/// passed through verbatim.
pub fn format_in_domain_answer(model_text: &str) -> String {
    model_text.to_string()
}
