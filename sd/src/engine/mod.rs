//! Generation orchestration
//!
//! The engine drives sequential per-batch requests, the reconciler decodes
//! each response into a single tagged outcome, and the accumulated document
//! collects the generated sections.

mod document;
mod reconcile;
mod run;

pub use document::{AccumulatedDocument, DocumentSection, UNPARSED_FRAGMENT_NAME, render_sections};
pub use reconcile::BatchOutcome;
pub use run::{CancelHandle, GenerationEngine, RunEvent, RunOutcome, RunState};
