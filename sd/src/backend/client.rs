//! GenerationBackend trait definition

use std::path::Path;

use async_trait::async_trait;

use super::error::BackendError;
use super::types::{GenerateRequest, GenerateResponse, HealthStatus};

/// Stateless client for the generation backend - each call is independent
///
/// This is the seam between the orchestration logic and the wire. The
/// orchestrator, the navigation client and the CLI only ever see this
/// trait; tests substitute a scripted implementation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Send one `/api/generate` request and return the raw body
    ///
    /// Used for both generation batches and navigation queries - the mode
    /// field of the request decides which. The body is returned undecoded;
    /// interpreting it is the reconciler's job.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, BackendError>;

    /// Upload a project document to the knowledge base
    ///
    /// Implementations must reject anything but a `.docx` file before any
    /// bytes leave the machine.
    async fn upload_document(&self, project_id: &str, file: &Path) -> Result<(), BackendError>;

    /// List known project identifiers
    async fn list_projects(&self) -> Result<Vec<String>, BackendError>;

    /// Probe the AI health endpoint
    async fn health(&self) -> Result<HealthStatus, BackendError>;
}
