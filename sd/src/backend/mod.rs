//! Generation backend client
//!
//! Wire contract, transport errors, the [`GenerationBackend`] trait and its
//! HTTP implementation.

mod client;
mod error;
mod http;
mod types;

pub use client::GenerationBackend;
pub use error::BackendError;
pub use http::HttpBackend;
pub use types::{
    ContentBlock, GenerateRequest, GenerateResponse, HealthState, HealthStatus, Message,
    ProjectList, RequestContext, ResponseOutput, Role, TaskMetadata, WireAnswer, WireDocument,
    WireSection,
};

#[cfg(test)]
pub use client::mock;
