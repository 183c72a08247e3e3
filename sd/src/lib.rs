//! specdriver - questionnaire-driven specification generation client
//!
//! specdriver collects structured project information as a multi-section
//! questionnaire, serializes it into a nested document, and drives a remote
//! AI backend to assemble a long-form technical specification one section
//! group at a time.
//!
//! # Core flow
//!
//! Answers pass the validation gate, the dot-path serializer builds the
//! questionnaire, and the generation engine walks the section plan with one
//! request in flight at a time, reconciling each response into the
//! accumulated document. A separate navigation client answers single-shot
//! questions against a project's knowledge base.
//!
//! # Modules
//!
//! - [`form`] - form definition, validation gate, path-object serializer
//! - [`plan`] - section-group planning
//! - [`backend`] - wire contract and the HTTP backend client
//! - [`engine`] - generation orchestration and the accumulated document
//! - [`navigate`] - project navigation queries
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod backend;
pub mod cli;
pub mod config;
pub mod engine;
pub mod form;
pub mod navigate;
pub mod plan;

// Re-export commonly used types
pub use backend::{BackendError, GenerationBackend, HealthState, HttpBackend};
pub use config::{BackendConfig, Config, GenerationConfig};
pub use engine::{
    AccumulatedDocument, BatchOutcome, CancelHandle, DocumentSection, GenerationEngine, RunEvent,
    RunOutcome, RunState,
};
pub use form::{
    FieldEntry, FormDefinition, Questionnaire, SerializeError, ValidationReport, serialize_entries,
    validate,
};
pub use navigate::{INVALID_RESPONSE_FALLBACK, NavigationClient, SEARCH_FAILED_MESSAGE};
pub use plan::{PlanError, SectionGroup, SectionPlan};
