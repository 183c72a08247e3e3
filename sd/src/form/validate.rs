//! Pre-flight validation gate
//!
//! Required fields are checked against the submitted values before any
//! network activity starts. The gate works on the plain form definition and
//! returns structured results; it never touches a widget tree. Sections
//! holding invalid fields are reported for expansion so the user can locate
//! them.

use std::collections::HashMap;

use tracing::debug;

use super::definition::FormDefinition;
use super::serialize::FieldEntry;

/// Outcome of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Identifiers of required fields that are blank, in form order
    pub invalid_fields: Vec<String>,
    /// Ids of sections to expand, in form order, deduplicated
    pub expand_sections: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid_fields.is_empty()
    }
}

/// Check every required field for a non-blank value
///
/// A field is blank when it is absent or its value is empty/whitespace.
/// When two entries share a field identifier the later one counts, matching
/// the serializer's last-write-wins rule.
pub fn validate(form: &FormDefinition, entries: &[FieldEntry]) -> ValidationReport {
    debug!(entry_count = entries.len(), "validate: called");

    let mut values: HashMap<&str, &str> = HashMap::new();
    for entry in entries {
        values.insert(entry.path.as_str(), entry.value.as_str());
    }

    let mut report = ValidationReport::default();
    for section in &form.sections {
        let mut section_invalid = false;
        for field in &section.fields {
            if !field.required {
                continue;
            }
            let blank = values.get(field.name).map_or(true, |v| v.trim().is_empty());
            if blank {
                debug!(field = field.name, "validate: required field blank");
                report.invalid_fields.push(field.name.to_string());
                section_invalid = true;
            }
        }
        if section_invalid {
            report.expand_sections.push(section.id.to_string());
        }
    }

    debug!(
        invalid = report.invalid_fields.len(),
        expanded = report.expand_sections.len(),
        "validate: done"
    );
    report
}
