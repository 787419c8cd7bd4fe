pub mod openrouter;

use crate::errors::AnswerError;
use crate::types::PromptPayload;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a hosted text-completion service.
///
/// This is the pipeline's only outbound call besides the corpus search.
/// Implementations must be single-shot per payload; retry policy is an
/// implementation concern and terminal failures map onto the
/// [`AnswerError`] completion variants.
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug + DynClone {
    /// Sends the assembled payload and returns the first completion
    /// choice's content, verbatim.
    async fn complete(&self, payload: &PromptPayload) -> Result<String, AnswerError>;
}

dyn_clone::clone_trait_object!(CompletionProvider);
