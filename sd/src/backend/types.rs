//! Wire types for the generation backend
//!
//! These model the `/api/generate` request/response contract. The response
//! shape is deliberately loose - every field the backend may or may not
//! send is an `Option`, and the reconciler decides what a body actually
//! means before any business logic touches it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::form::Questionnaire;

/// Fixed user prompt for a generation batch
const GENERATE_PROMPT: &str = "Generate the technical specification from the questionnaire.";

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A content block in a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

/// A message in the request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    /// Create a user message with a single text block
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::text(text)],
        }
    }
}

/// Project-scoped metadata attached to navigation requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskMetadata {
    pub project_id: String,
}

/// The `context` object of a generate request
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    pub questionnaire: Questionnaire,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_sections: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_metadata: Option<TaskMetadata>,
}

/// One request to `POST /api/generate`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub mode: String,
    pub messages: Vec<Message>,
    pub context: RequestContext,
}

impl GenerateRequest {
    /// Request one batch of specification sections
    ///
    /// The questionnaire is the immutable context for every batch of a run;
    /// the target sections are the only per-batch variation.
    pub fn generate_tz(questionnaire: &Questionnaire, sections: &[String]) -> Self {
        debug!(section_count = sections.len(), "GenerateRequest::generate_tz: called");
        Self {
            mode: "generate_tz".to_string(),
            messages: vec![Message::user(GENERATE_PROMPT)],
            context: RequestContext {
                questionnaire: questionnaire.clone(),
                target_sections: Some(sections.to_vec()),
                task_metadata: None,
            },
        }
    }

    /// Ask a single navigation question against a project's knowledge base
    ///
    /// The project identifier travels as metadata, not as message content.
    pub fn qa_navigation(query: &str, project_id: &str) -> Self {
        debug!(%project_id, "GenerateRequest::qa_navigation: called");
        Self {
            mode: "qa_navigation".to_string(),
            messages: vec![Message::user(query)],
            context: RequestContext {
                questionnaire: Questionnaire::empty(),
                target_sections: None,
                task_metadata: Some(TaskMetadata {
                    project_id: project_id.to_string(),
                }),
            },
        }
    }
}

/// One generated document section as the backend returns it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireSection {
    pub name: String,
    pub content: String,
}

/// The structured document part of a successful response
#[derive(Debug, Clone, Deserialize)]
pub struct WireDocument {
    pub sections: Vec<WireSection>,
}

/// The answer part of a navigation response
#[derive(Debug, Clone, Deserialize)]
pub struct WireAnswer {
    pub text: String,
}

/// The `output` object of a response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseOutput {
    #[serde(default)]
    pub document: Option<WireDocument>,

    #[serde(default)]
    pub answer: Option<WireAnswer>,
}

/// A raw `/api/generate` response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    /// "error", "partial_error", or absent on success
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub output: Option<ResponseOutput>,

    /// Unstructured model output the backend could not parse into sections
    #[serde(default)]
    pub raw_output: Option<String>,

    /// Human-readable error detail
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /api/projects` response body
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<String>,
}

/// `GET /api/health/ai` response body
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

/// Tri-state AI availability indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthState {
    /// Probe not finished yet
    #[default]
    Checking,
    Online,
    Offline,
}

impl HealthState {
    /// Map a probe result onto the indicator
    pub fn from_probe(result: &Result<HealthStatus, crate::backend::BackendError>) -> Self {
        match result {
            Ok(status) if status.status == "healthy" => HealthState::Online,
            _ => HealthState::Offline,
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthState::Checking => write!(f, "checking"),
            HealthState::Online => write!(f, "online"),
            HealthState::Offline => write!(f, "offline"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::form::{FieldEntry, serialize_entries};

    #[test]
    fn test_generate_tz_request_shape() {
        let q = serialize_entries(&[FieldEntry::new("project_info.basic_data.full_name", "X")]).unwrap();
        let req = GenerateRequest::generate_tz(&q, &["1".to_string(), "2".to_string()]);

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["mode"], "generate_tz");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"][0]["type"], "text");
        assert_eq!(
            body["context"]["questionnaire"]["project_info"]["basic_data"]["full_name"],
            "X"
        );
        assert_eq!(body["context"]["target_sections"][0], "1");
        assert_eq!(body["context"]["target_sections"][1], "2");
        assert!(body["context"].get("task_metadata").is_none());
    }

    #[test]
    fn test_qa_navigation_request_shape() {
        let req = GenerateRequest::qa_navigation("What are the security requirements?", "gold");

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["mode"], "qa_navigation");
        assert_eq!(
            body["messages"][0]["content"][0]["text"],
            "What are the security requirements?"
        );
        assert_eq!(body["context"]["task_metadata"]["project_id"], "gold");
        assert!(body["context"]["questionnaire"].as_object().unwrap().is_empty());
        assert!(body["context"].get("target_sections").is_none());
    }

    #[test]
    fn test_response_decodes_success_shape() {
        let body = r#"{
            "output": { "document": { "sections": [
                { "name": "General Information", "content": "..." }
            ]}}
        }"#;
        let resp: GenerateResponse = serde_json::from_str(body).unwrap();
        assert!(resp.status.is_none());
        let doc = resp.output.unwrap().document.unwrap();
        assert_eq!(doc.sections[0].name, "General Information");
    }

    #[test]
    fn test_response_decodes_error_shape() {
        let body = r#"{ "status": "error", "message": "model unavailable" }"#;
        let resp: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.status.as_deref(), Some("error"));
        assert_eq!(resp.message.as_deref(), Some("model unavailable"));
    }

    #[test]
    fn test_health_state_mapping() {
        let ok: Result<HealthStatus, BackendError> = Ok(HealthStatus {
            status: "healthy".to_string(),
        });
        assert_eq!(HealthState::from_probe(&ok), HealthState::Online);

        let degraded: Result<HealthStatus, BackendError> = Ok(HealthStatus {
            status: "unhealthy".to_string(),
        });
        assert_eq!(HealthState::from_probe(&degraded), HealthState::Offline);

        let err: Result<HealthStatus, BackendError> =
            Err(BackendError::InvalidResponse("down".to_string()));
        assert_eq!(HealthState::from_probe(&err), HealthState::Offline);
    }
}
