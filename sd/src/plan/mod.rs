//! Section-group planning
//!
//! A generation run never asks the backend for the whole document at once.
//! The plan partitions the specification's sections into ordered groups,
//! one request per group. Granularity is a deployment choice: finer groups
//! isolate failures to fewer sections and give smoother progress feedback,
//! coarser groups save round trips. The plan is data - changing it never
//! touches the orchestrator.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Section identifiers of the generated specification, in document order
pub const SECTION_UNIVERSE: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];

/// One batch of sections requested in a single generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionGroup {
    /// Section identifiers, in document order
    pub sections: Vec<String>,
    /// Display label used in status lines
    pub label: String,
}

impl SectionGroup {
    pub fn new<I, S>(sections: I, label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
            label: label.into(),
        }
    }
}

/// Plan shape problems caught before a run starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("plan has no groups")]
    Empty,

    #[error("group '{0}' has no sections")]
    EmptyGroup(String),

    #[error("section '{0}' appears in more than one group")]
    Duplicate(String),

    #[error("section '{0}' is missing from the plan")]
    Missing(String),

    #[error("section '{0}' is not part of the document outline")]
    Unknown(String),
}

/// The ordered partition of sections into generation batches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPlan {
    groups: Vec<SectionGroup>,
}

impl SectionPlan {
    /// Build a plan from explicit groups, checking it partitions `universe`
    /// exactly - every section once, nothing unknown, nothing missing.
    pub fn new(groups: Vec<SectionGroup>, universe: &[&str]) -> Result<Self, PlanError> {
        debug!(group_count = groups.len(), "SectionPlan::new: called");
        if groups.is_empty() {
            return Err(PlanError::Empty);
        }

        let mut seen: Vec<&str> = Vec::new();
        for group in &groups {
            if group.sections.is_empty() {
                return Err(PlanError::EmptyGroup(group.label.clone()));
            }
            for id in &group.sections {
                if !universe.contains(&id.as_str()) {
                    return Err(PlanError::Unknown(id.clone()));
                }
                if seen.contains(&id.as_str()) {
                    return Err(PlanError::Duplicate(id.clone()));
                }
                seen.push(id);
            }
        }
        for id in universe {
            if !seen.contains(id) {
                return Err(PlanError::Missing((*id).to_string()));
            }
        }

        Ok(Self { groups })
    }

    /// The operational default: one section per request
    ///
    /// Finest granularity over the ten-section outline. A failed request
    /// costs one section, and every completed batch moves the progress bar.
    pub fn ten_way() -> Self {
        let labels = [
            ("1", "General Information"),
            ("2", "Purpose and Objectives"),
            ("3", "Functional Requirements"),
            ("4", "Non-functional Requirements"),
            ("5", "System Architecture"),
            ("6", "Technology Stack"),
            ("7", "Integration Requirements"),
            ("8", "Information Security"),
            ("9", "Acceptance and Testing"),
            ("10", "Documentation and Support"),
        ];
        let groups = labels
            .iter()
            .map(|(id, label)| SectionGroup::new([*id], *label))
            .collect();
        Self::new(groups, &SECTION_UNIVERSE).expect("built-in plan is a valid partition")
    }

    pub fn groups(&self) -> &[SectionGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for SectionPlan {
    fn default() -> Self {
        Self::ten_way()
    }
}
