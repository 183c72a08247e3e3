//! HTTP implementation of the generation backend
//!
//! Thin reqwest client over the backend's REST surface. One client is built
//! per process with the configured per-request timeout; a timed-out request
//! surfaces as a transport failure like any other network error.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::config::BackendConfig;

use super::client::GenerationBackend;
use super::error::BackendError;
use super::types::{GenerateRequest, GenerateResponse, HealthStatus, ProjectList};

/// HTTP client for the generation backend
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    /// Create a client from configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        debug!(?config, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, BackendError> {
        debug!(mode = %request.mode, "generate: called");
        let response = self
            .http
            .post(self.url("/api/generate"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "generate: non-success status");
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        debug!("generate: success");
        Ok(response.json().await?)
    }

    async fn upload_document(&self, project_id: &str, file: &Path) -> Result<(), BackendError> {
        debug!(%project_id, file = %file.display(), "upload_document: called");

        // The backend only ingests .docx; reject locally before reading.
        let is_docx = file
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("docx"));
        if !is_docx {
            debug!("upload_document: rejected non-docx file");
            return Err(BackendError::UnsupportedFile(file.display().to_string()));
        }

        let bytes = tokio::fs::read(file).await?;
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.docx".to_string());
        let form = Form::new().part("file", Part::bytes(bytes).file_name(filename));

        let response = self
            .http
            .post(self.url("/api/upload"))
            .query(&[("project_id", project_id)])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        debug!("upload_document: success");
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<String>, BackendError> {
        debug!("list_projects: called");
        let response = self.http.get(self.url("/api/projects")).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let list: ProjectList = response.json().await?;
        Ok(list.projects)
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        debug!("health: called");
        let response = self.http.get(self.url("/api/health/ai")).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> HttpBackend {
        HttpBackend::from_config(&BackendConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout_ms: 1_000,
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = backend();
        assert_eq!(backend.url("/api/generate"), "http://localhost:8000/api/generate");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_docx_before_network() {
        // The extension gate must fire before any request is attempted.
        let backend = backend();
        let result = backend
            .upload_document("demo", Path::new("notes.pdf"))
            .await;

        match result {
            Err(BackendError::UnsupportedFile(name)) => assert!(name.contains("notes.pdf")),
            other => panic!("expected UnsupportedFile, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_upload_accepts_docx_case_insensitively() {
        // Missing file: the gate passes, the local read fails - still no network.
        let backend = backend();
        let result = backend
            .upload_document("demo", Path::new("/nonexistent/Doc.DOCX"))
            .await;
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
