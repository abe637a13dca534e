//! Template schema types

use serde::Serialize;

/// How a section's content is shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Single-line document title
    Title,

    /// Free text
    Paragraph,

    /// Bullet list
    List,
}

/// How a section is located in the document body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum SectionMarker {
    /// The first `# ` line of the document
    Title,

    /// An exact markdown heading line, e.g. `## Considered Options`
    Heading(&'static str),

    /// A clause keyword at the start of a line, e.g. `we decided for`
    Clause(&'static str),

    /// The whole body
    Body,
}

impl SectionMarker {
    /// Returns true if `line` is this marker's heading line
    pub fn is_heading_line(&self, line: &str) -> bool {
        match self {
            SectionMarker::Heading(heading) => line.trim() == *heading,
            _ => false,
        }
    }

    /// If `line` opens this clause, returns the text after the keyword
    pub fn clause_rest<'a>(&self, line: &'a str) -> Option<&'a str> {
        let SectionMarker::Clause(keyword) = self else {
            return None;
        };
        let rest = line.trim_start().strip_prefix(keyword)?;
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            Some(rest.trim())
        } else {
            None
        }
    }
}

/// One section of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSpec {
    /// Stable key, shared across templates for the same meaning
    pub id: &'static str,

    /// How the section is found and rendered
    pub marker: SectionMarker,

    /// Content shape
    pub kind: SectionKind,

    /// Informational only; never enforced
    pub required: bool,

    /// Example text shown to authors; never written into documents
    pub placeholder: &'static str,
}

impl SectionSpec {
    pub(crate) const fn new(
        id: &'static str,
        marker: SectionMarker,
        kind: SectionKind,
        required: bool,
        placeholder: &'static str,
    ) -> Self {
        Self {
            id,
            marker,
            kind,
            required,
            placeholder,
        }
    }
}

/// A document kind: a fixed, ordered list of sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSchema {
    /// Identifier stored alongside documents
    pub id: &'static str,

    /// Human-readable name
    pub name: &'static str,

    /// One-line description
    pub description: &'static str,

    /// Sections in document order
    pub sections: Vec<SectionSpec>,

    /// Whether generated documents always carry the default metadata block
    pub synthesizes_metadata: bool,
}

impl TemplateSchema {
    /// Gets a section spec by id
    pub fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Returns the section ids in order
    pub fn section_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|s| s.id)
    }

    /// Returns true if any section is located by clause keyword
    pub fn uses_clauses(&self) -> bool {
        self.sections
            .iter()
            .any(|s| matches!(s.marker, SectionMarker::Clause(_)))
    }
}
