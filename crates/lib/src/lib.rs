//! # Samvidhan
//!
//! A question-answering pipeline over the articles of the Indian
//! Constitution. An incoming message is classified (meta, in-domain,
//! out-of-domain), relevant articles are retrieved by ranked text search,
//! a bounded-context prompt is assembled, and the completion service's
//! response is formatted into the final answer. Session, folder and user
//! persistence are external collaborators and live outside this crate.

pub mod assembler;
pub mod classifier;
pub mod errors;
pub mod formatter;
pub mod prompts;
pub mod providers;
pub mod retriever;
pub mod types;

pub use errors::AnswerError;
pub use types::{Answer, AnswerEngine, AnswerEngineBuilder};

use crate::assembler::{assemble, Assembled};
use crate::classifier::{classify, QueryIntent};
use crate::formatter::{format_in_domain_answer, format_meta_answer};
use crate::prompts::FAILURE_MESSAGE;
use crate::retriever::retrieve;
use tracing::{debug, error, info};

impl AnswerEngine {
    /// Answers a single user message.
    ///
    /// Runs the full pipeline: validate, classify, retrieve (in-domain
    /// only), assemble, complete, format. Every stage is a pure function of
    /// its inputs except the corpus search and the completion call, and no
    /// state survives the request.
    ///
    /// The only error surface is the boundary validation of an empty
    /// message. Retrieval and completion failures are logged and translated
    /// into the single fixed failure message, so the caller always receives
    /// either a substantive answer or one of three fixed fallback texts.
    pub async fn answer(&self, message: &str) -> Result<Answer, AnswerError> {
        if message.trim().is_empty() {
            return Err(AnswerError::EmptyMessage);
        }

        let intent = classify(&self.classifier, message);
        info!(?intent, "[answer] classified message");

        let passages = match intent {
            QueryIntent::InDomain => {
                match retrieve(self.corpus_index.as_ref(), message).await {
                    Ok(passages) => passages,
                    Err(e) => {
                        error!(error = %e, "[answer] retrieval failed");
                        return Ok(Answer::fixed(FAILURE_MESSAGE));
                    }
                }
            }
            QueryIntent::Meta | QueryIntent::OutOfDomain => Vec::new(),
        };

        match assemble(intent, message, &passages, &self.generation) {
            Assembled::Fixed(text) => {
                debug!("[answer] short-circuit, no completion call");
                Ok(Answer::fixed(text))
            }
            Assembled::Call(payload) => {
                match self.completion_provider.complete(&payload).await {
                    Ok(model_text) => {
                        let answer = match intent {
                            QueryIntent::Meta => Answer::fixed(format_meta_answer(
                                &model_text,
                                &self.generation.model,
                            )),
                            QueryIntent::InDomain => Answer {
                                text: format_in_domain_answer(&model_text),
                                used_passages: passages
                                    .into_iter()
                                    .map(|passage| passage.article)
                                    .collect(),
                            },
                            // Out-of-domain always short-circuits above.
                            QueryIntent::OutOfDomain => Answer::fixed(model_text),
                        };
                        Ok(answer)
                    }
                    Err(e) => {
                        error!(error = %e, "[answer] completion failed");
                        Ok(Answer::fixed(FAILURE_MESSAGE))
                    }
                }
            }
        }
    }
}
