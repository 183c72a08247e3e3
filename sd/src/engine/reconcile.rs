//! Response reconciliation
//!
//! The backend answers one batch request with one of several shapes: a
//! structured document, an explicit error, a partial/raw fallback, or
//! something unusable. A body is decoded into exactly one [`BatchOutcome`]
//! variant here, before any orchestration logic looks at it.

use tracing::debug;

use crate::backend::GenerateResponse;

use super::document::DocumentSection;

/// What one batch response actually means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Structured sections to append
    Sections(Vec<DocumentSection>),
    /// Recoverable but incomplete: raw text the backend could not structure
    PartialFallback(String),
    /// The backend declared a hard error in a well-formed body
    BackendError(String),
    /// Neither a document, nor a fallback, nor a declared error
    Malformed,
}

impl BatchOutcome {
    /// Decode one raw response body
    ///
    /// `placeholder` is the backend's locale-specific marker for "this
    /// section was not generated". Placeholder sections are dropped only
    /// when the same batch also produced real content; a batch that is all
    /// placeholders is kept whole so nothing disappears silently.
    pub fn from_response(response: GenerateResponse, placeholder: &str) -> Self {
        match response.status.as_deref() {
            Some("error") => {
                let message = response
                    .message
                    .unwrap_or_else(|| "backend reported an error".to_string());
                debug!(%message, "from_response: backend-declared error");
                return BatchOutcome::BackendError(message);
            }
            Some("partial_error") => {
                debug!("from_response: partial_error status");
                return match response.raw_output {
                    Some(raw) => BatchOutcome::PartialFallback(raw),
                    None => BatchOutcome::Malformed,
                };
            }
            _ => {}
        }

        if let Some(document) = response.output.and_then(|o| o.document) {
            let sections: Vec<DocumentSection> = document
                .sections
                .into_iter()
                .map(|s| DocumentSection::new(s.name, s.content))
                .collect();
            debug!(section_count = sections.len(), "from_response: structured document");
            return BatchOutcome::Sections(filter_placeholders(sections, placeholder));
        }

        if let Some(raw) = response.raw_output {
            debug!("from_response: raw fallback without document");
            return BatchOutcome::PartialFallback(raw);
        }

        debug!("from_response: unusable body");
        BatchOutcome::Malformed
    }
}

fn filter_placeholders(sections: Vec<DocumentSection>, placeholder: &str) -> Vec<DocumentSection> {
    let any_real = sections.iter().any(|s| s.content.trim() != placeholder);
    if !any_real {
        // Every section is a placeholder: keep them all, the user should
        // see that the batch genuinely produced nothing.
        return sections;
    }
    sections
        .into_iter()
        .filter(|s| s.content.trim() != placeholder)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ResponseOutput, WireDocument, WireSection};

    const PLACEHOLDER: &str = "section not generated by model";

    fn body_with_sections(sections: Vec<(&str, &str)>) -> GenerateResponse {
        GenerateResponse {
            output: Some(ResponseOutput {
                document: Some(WireDocument {
                    sections: sections
                        .into_iter()
                        .map(|(name, content)| WireSection {
                            name: name.to_string(),
                            content: content.to_string(),
                        })
                        .collect(),
                }),
                answer: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_success_extracts_sections_in_order() {
        let body = body_with_sections(vec![("One", "a"), ("Two", "b")]);
        let outcome = BatchOutcome::from_response(body, PLACEHOLDER);

        assert_eq!(
            outcome,
            BatchOutcome::Sections(vec![
                DocumentSection::new("One", "a"),
                DocumentSection::new("Two", "b"),
            ])
        );
    }

    #[test]
    fn test_error_status_wins_over_document() {
        let mut body = body_with_sections(vec![("One", "a")]);
        body.status = Some("error".to_string());
        body.message = Some("model unavailable".to_string());

        assert_eq!(
            BatchOutcome::from_response(body, PLACEHOLDER),
            BatchOutcome::BackendError("model unavailable".to_string())
        );
    }

    #[test]
    fn test_error_status_without_message_gets_generic_text() {
        let body = GenerateResponse {
            status: Some("error".to_string()),
            ..Default::default()
        };
        match BatchOutcome::from_response(body, PLACEHOLDER) {
            BatchOutcome::BackendError(msg) => assert!(!msg.is_empty()),
            other => panic!("expected BackendError, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_error_status_with_raw_output() {
        let body = GenerateResponse {
            status: Some("partial_error".to_string()),
            raw_output: Some("half-finished text".to_string()),
            ..Default::default()
        };
        assert_eq!(
            BatchOutcome::from_response(body, PLACEHOLDER),
            BatchOutcome::PartialFallback("half-finished text".to_string())
        );
    }

    #[test]
    fn test_partial_error_status_without_raw_output_is_malformed() {
        let body = GenerateResponse {
            status: Some("partial_error".to_string()),
            ..Default::default()
        };
        assert_eq!(
            BatchOutcome::from_response(body, PLACEHOLDER),
            BatchOutcome::Malformed
        );
    }

    #[test]
    fn test_missing_document_with_raw_output_is_partial() {
        let body = GenerateResponse {
            raw_output: Some("raw text".to_string()),
            ..Default::default()
        };
        assert_eq!(
            BatchOutcome::from_response(body, PLACEHOLDER),
            BatchOutcome::PartialFallback("raw text".to_string())
        );
    }

    #[test]
    fn test_empty_body_is_malformed() {
        assert_eq!(
            BatchOutcome::from_response(GenerateResponse::default(), PLACEHOLDER),
            BatchOutcome::Malformed
        );
    }

    #[test]
    fn test_placeholders_dropped_when_siblings_are_real() {
        let body = body_with_sections(vec![
            ("One", "real content"),
            ("Two", PLACEHOLDER),
            ("Three", "more content"),
        ]);
        assert_eq!(
            BatchOutcome::from_response(body, PLACEHOLDER),
            BatchOutcome::Sections(vec![
                DocumentSection::new("One", "real content"),
                DocumentSection::new("Three", "more content"),
            ])
        );
    }

    #[test]
    fn test_all_placeholder_batch_kept_whole() {
        let body = body_with_sections(vec![("One", PLACEHOLDER), ("Two", PLACEHOLDER)]);
        assert_eq!(
            BatchOutcome::from_response(body, PLACEHOLDER),
            BatchOutcome::Sections(vec![
                DocumentSection::new("One", PLACEHOLDER),
                DocumentSection::new("Two", PLACEHOLDER),
            ])
        );
    }

    #[test]
    fn test_placeholder_match_ignores_surrounding_whitespace() {
        let padded = format!("  {}\n", PLACEHOLDER);
        let body = body_with_sections(vec![("One", "real"), ("Two", padded.as_str())]);
        assert_eq!(
            BatchOutcome::from_response(body, PLACEHOLDER),
            BatchOutcome::Sections(vec![DocumentSection::new("One", "real")])
        );
    }
}
