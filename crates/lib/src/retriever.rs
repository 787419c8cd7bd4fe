//! # Retrieval Policy
//!
//! Decides how an in-domain query is searched: queries mentioning "rights"
//! are narrowed to Part III (Fundamental Rights) for precision, everything
//! else searches the whole corpus. The index returns passages sorted
//! descending by relevance; this module caps them at [`MAX_PASSAGES`].

use crate::errors::AnswerError;
use crate::providers::db::corpus::{CorpusIndex, SearchFilter};
use crate::types::RetrievedPassage;
use tracing::debug;

/// The maximum number of passages fed into a single prompt. Keeps the
/// assembled context within the completion service's input budget.
pub const MAX_PASSAGES: usize = 5;

/// The part holding the Fundamental Rights articles.
const FUNDAMENTAL_RIGHTS_PART: &str = "III";

/// Searches the corpus for passages relevant to an in-domain query.
///
/// Zero results is a valid outcome and returns an empty vector, not an
/// error; the assembler short-circuits that case.
pub async fn retrieve(
    index: &dyn CorpusIndex,
    query: &str,
) -> Result<Vec<RetrievedPassage>, AnswerError> {
    let filter = if query.to_lowercase().contains("rights") {
        SearchFilter {
            part: Some(FUNDAMENTAL_RIGHTS_PART.to_string()),
        }
    } else {
        SearchFilter::default()
    };

    debug!(?filter, query, "[retrieve] searching corpus");
    let mut passages = index.search(query, &filter, MAX_PASSAGES).await?;
    passages.truncate(MAX_PASSAGES);
    Ok(passages)
}
