//! Questionnaire form definition
//!
//! A plain description of the generator form: sections of named fields with
//! required flags. The presentation layer renders it however it likes; the
//! validation gate and serializer only ever see this structure, never a
//! live widget tree.

/// One named input in the form
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Dot-path identifier, consumed verbatim by the serializer
    pub name: &'static str,
    /// Display label
    pub label: &'static str,
    /// Whether the field must be non-blank before generation starts
    pub required: bool,
}

impl FieldDef {
    const fn required(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: true,
        }
    }

    const fn optional(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: false,
        }
    }
}

/// A collapsible group of fields
#[derive(Debug, Clone)]
pub struct FormSection {
    pub id: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldDef>,
}

/// The whole generator form
#[derive(Debug, Clone)]
pub struct FormDefinition {
    pub sections: Vec<FormSection>,
}

impl FormDefinition {
    /// Find the section that encloses a field
    pub fn section_of(&self, field_name: &str) -> Option<&FormSection> {
        self.sections
            .iter()
            .find(|s| s.fields.iter().any(|f| f.name == field_name))
    }

    /// The standard project questionnaire
    pub fn standard() -> Self {
        Self {
            sections: vec![
                FormSection {
                    id: "project_info",
                    title: "Project Information",
                    fields: vec![
                        FieldDef::required("project_info.basic_data.full_name", "Full project name"),
                        FieldDef::optional("project_info.basic_data.short_code", "Short code"),
                        FieldDef::required("project_info.basic_data.category", "Category"),
                        FieldDef::required("project_info.basic_data.customer_org", "Customer organization"),
                        FieldDef::required("project_info.development_basis.document_type", "Basis document type"),
                        FieldDef::required("project_info.development_basis.document_details", "Basis document details"),
                        FieldDef::required("project_info.timeline.start_date", "Start date"),
                        FieldDef::required("project_info.timeline.end_date", "End date"),
                        FieldDef::required("project_info.lifecycle.type", "Lifecycle model"),
                        FieldDef::required("project_info.goals.audience", "Target audience"),
                        FieldDef::required("project_info.goals.problem_statement", "Problem statement"),
                        FieldDef::required("project_info.goals.outcome", "Expected outcome"),
                    ],
                },
                FormSection {
                    id: "stakeholders",
                    title: "Stakeholders",
                    fields: vec![
                        FieldDef::required("stakeholders.business_owner", "Business owner"),
                        FieldDef::required("stakeholders.technical_owner", "Technical owner"),
                        FieldDef::required("stakeholders.end_users_description", "End users"),
                        FieldDef::optional("stakeholders.user_roles_description", "User roles"),
                    ],
                },
                FormSection {
                    id: "automation_object",
                    title: "Automation Object",
                    fields: vec![
                        FieldDef::optional("automation_object.current_state_description", "Current state"),
                        FieldDef::optional("automation_object.business_processes", "Business processes"),
                        FieldDef::optional("automation_object.operating_conditions.work_mode", "Work mode"),
                    ],
                },
                FormSection {
                    id: "functional_requirements",
                    title: "Functional Requirements",
                    fields: vec![FieldDef::optional(
                        "functional_requirements.use_cases_raw",
                        "Use cases",
                    )],
                },
                FormSection {
                    id: "architecture_requirements",
                    title: "Architecture Requirements",
                    fields: vec![
                        FieldDef::optional("architecture_requirements.style", "Architecture style"),
                        FieldDef::optional(
                            "architecture_requirements.infrastructure.deployment_model",
                            "Deployment model",
                        ),
                        FieldDef::optional(
                            "architecture_requirements.data_architecture.db_types",
                            "Database types",
                        ),
                        FieldDef::optional(
                            "architecture_requirements.integrations.patterns",
                            "Integration patterns",
                        ),
                        FieldDef::optional("architecture_requirements.adr_raw", "Architecture decisions"),
                    ],
                },
                FormSection {
                    id: "non_functional_requirements",
                    title: "Non-functional Requirements",
                    fields: vec![
                        FieldDef::optional("non_functional_requirements.performance", "Performance"),
                        FieldDef::optional("non_functional_requirements.scalability", "Scalability"),
                        FieldDef::optional(
                            "non_functional_requirements.security.raw_requirements",
                            "Security requirements",
                        ),
                    ],
                },
                FormSection {
                    id: "tech_stack",
                    title: "Technology Stack",
                    fields: vec![
                        FieldDef::optional("tech_stack.software_description", "Software stack"),
                        FieldDef::optional("tech_stack.integrations_list", "External systems"),
                    ],
                },
                FormSection {
                    id: "acceptance",
                    title: "Acceptance",
                    fields: vec![FieldDef::optional(
                        "acceptance.procedure_and_criteria",
                        "Acceptance procedure and criteria",
                    )],
                },
                FormSection {
                    id: "documentation",
                    title: "Documentation",
                    fields: vec![FieldDef::optional(
                        "documentation.required_documents",
                        "Required documents",
                    )],
                },
                FormSection {
                    id: "compliance",
                    title: "Compliance",
                    fields: vec![
                        FieldDef::optional("compliance.kmu_205_compliance.criticality", "Criticality class"),
                        FieldDef::optional("compliance.data_localization", "Data localization"),
                        FieldDef::optional("compliance.international_standards", "International standards"),
                    ],
                },
                FormSection {
                    id: "constraints",
                    title: "Constraints and Assumptions",
                    fields: vec![
                        FieldDef::optional("constraints.technical_and_budgetary", "Technical and budget constraints"),
                        FieldDef::optional("constraints.project_assumptions", "Project assumptions"),
                    ],
                },
                FormSection {
                    id: "additional_info",
                    title: "Additional Information",
                    fields: vec![FieldDef::optional("additional_info.pm_contacts", "PM contacts")],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_form_has_twelve_sections() {
        let form = FormDefinition::standard();
        assert_eq!(form.sections.len(), 12);
    }

    #[test]
    fn test_field_names_are_unique_dot_paths() {
        let form = FormDefinition::standard();
        let mut seen = std::collections::HashSet::new();
        for section in &form.sections {
            for field in &section.fields {
                assert!(seen.insert(field.name), "duplicate field: {}", field.name);
                assert!(!field.name.split('.').any(str::is_empty));
            }
        }
    }

    #[test]
    fn test_section_of_resolves_enclosing_section() {
        let form = FormDefinition::standard();
        let section = form.section_of("stakeholders.business_owner").unwrap();
        assert_eq!(section.id, "stakeholders");
        assert!(form.section_of("no.such.field").is_none());
    }
}
