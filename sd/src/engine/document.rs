//! The accumulated specification document

use serde::Serialize;

/// Heading used when a batch's raw fallback text is kept verbatim
pub const UNPARSED_FRAGMENT_NAME: &str = "Unparsed model output";

/// One generated section of the specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSection {
    pub name: String,
    pub content: String,
}

impl DocumentSection {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Wrap raw fallback text as a clearly marked fragment
    pub fn unparsed(raw: impl Into<String>) -> Self {
        Self::new(UNPARSED_FRAGMENT_NAME, raw)
    }
}

/// The ordered sections accumulated during one generation run
///
/// Append-only while a run is active; reset to empty when the next run
/// starts. Rendering is the only read shape the preview surface needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccumulatedDocument {
    sections: Vec<DocumentSection>,
}

impl AccumulatedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: DocumentSection) {
        self.sections.push(section);
    }

    pub fn extend(&mut self, sections: impl IntoIterator<Item = DocumentSection>) {
        self.sections.extend(sections);
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn sections(&self) -> &[DocumentSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Render as markdown: `## name` headings joined by blank lines
    pub fn render(&self) -> String {
        render_sections(&self.sections)
    }
}

/// Render any section list the way the preview shows it
pub fn render_sections(sections: &[DocumentSection]) -> String {
    sections
        .iter()
        .map(|s| format!("## {}\n{}", s.name, s.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_joins_with_blank_lines() {
        let mut doc = AccumulatedDocument::new();
        doc.push(DocumentSection::new("One", "first"));
        doc.push(DocumentSection::new("Two", "second"));

        assert_eq!(doc.render(), "## One\nfirst\n\n## Two\nsecond");
    }

    #[test]
    fn test_render_empty_document() {
        assert_eq!(AccumulatedDocument::new().render(), "");
    }

    #[test]
    fn test_unparsed_fragment_is_marked() {
        let section = DocumentSection::unparsed("raw text");
        assert_eq!(section.name, UNPARSED_FRAGMENT_NAME);
        assert_eq!(section.content, "raw text");
    }

    #[test]
    fn test_clear_resets() {
        let mut doc = AccumulatedDocument::new();
        doc.push(DocumentSection::new("One", "x"));
        doc.clear();
        assert!(doc.is_empty());
    }
}
