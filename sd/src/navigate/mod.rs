//! Project navigation queries
//!
//! A single-shot question-answering path against a project's knowledge
//! base. Independent of the generation orchestrator - the two share
//! nothing mutable and may be active at the same time.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::{GenerateRequest, GenerateResponse, GenerationBackend};
use crate::engine::{DocumentSection, render_sections};

/// Shown when the backend answered but the payload carried nothing usable
pub const INVALID_RESPONSE_FALLBACK: &str = "The assistant returned an unrecognized response.";

/// Shown when the request itself failed; distinct from the payload fallback
/// so "service unreachable" and "service confused" stay distinguishable
pub const SEARCH_FAILED_MESSAGE: &str =
    "Project knowledge search failed. Check the backend connection.";

/// Client for the question-answering request path
pub struct NavigationClient {
    backend: Arc<dyn GenerationBackend>,
}

impl NavigationClient {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Ask one question scoped to a project
    ///
    /// A blank query is a no-op: `None` is returned and no request is made,
    /// leaving whatever the caller currently displays untouched. Otherwise
    /// the result is always `Some` displayable text - an answer, a
    /// serialized document, or one of the fixed fallback messages. No
    /// batching, no retry.
    pub async fn ask(&self, query: &str, project_id: &str) -> Option<String> {
        if query.trim().is_empty() {
            debug!("ask: blank query, skipping request");
            return None;
        }

        debug!(%project_id, "ask: called");
        let request = GenerateRequest::qa_navigation(query, project_id);
        match self.backend.generate(request).await {
            Ok(body) => Some(extract_answer(body)),
            Err(err) => {
                warn!(error = %err, "ask: request failed");
                Some(SEARCH_FAILED_MESSAGE.to_string())
            }
        }
    }
}

/// Pull displayable text out of a navigation response
///
/// Prefers the answer text; falls back to serializing a document if one is
/// present; otherwise the invalid-response sentinel.
fn extract_answer(body: GenerateResponse) -> String {
    let Some(output) = body.output else {
        debug!("extract_answer: no output object");
        return INVALID_RESPONSE_FALLBACK.to_string();
    };

    if let Some(answer) = output.answer {
        debug!("extract_answer: answer text");
        return answer.text;
    }

    if let Some(document) = output.document {
        debug!("extract_answer: falling back to document serialization");
        let sections: Vec<DocumentSection> = document
            .sections
            .into_iter()
            .map(|s| DocumentSection::new(s.name, s.content))
            .collect();
        return render_sections(&sections);
    }

    debug!("extract_answer: output carries neither answer nor document");
    INVALID_RESPONSE_FALLBACK.to_string()
}
