//! Form description, validation and serialization
//!
//! The generator form is described as plain data ([`FormDefinition`]), the
//! validation gate checks required fields before any network call, and the
//! serializer turns the flat dot-path entries into the nested questionnaire
//! the backend consumes.

mod definition;
mod serialize;
mod validate;

pub use definition::{FieldDef, FormDefinition, FormSection};
pub use serialize::{FieldEntry, Questionnaire, SerializeError, serialize_entries};
pub use validate::{ValidationReport, validate};
