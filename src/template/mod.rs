//! # Template Registry
//!
//! Fixed section layouts for each supported document kind.
//!
//! ## Built-in Templates
//!
//! | Id | Sections | Located by |
//! |----|----------|------------|
//! | `madr-minimal` | 5 | `#`/`##`/`###` headings |
//! | `madr-full` | 9 | headings, plus a default metadata block |
//! | `y-statement` | 8 | clause keywords (`facing`, `we decided for`, ...) |
//! | `free-form` | 1 | the whole body |
//!
//! The registry is built once and never mutated. It is handed to the
//! transcoder rather than reached through a global.
//!
//! ## Key Types
//!
//! - [`TemplateRegistry`] - Ordered, read-only set of templates
//! - [`TemplateSchema`] - One document kind
//! - [`SectionSpec`] - One section of a template

pub mod builtin;
mod schema;

use thiserror::Error;

pub use schema::{SectionKind, SectionMarker, SectionSpec, TemplateSchema};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Unknown template: {0}")]
    UnknownSchema(String),
}

/// Read-only set of document templates
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<TemplateSchema>,
}

impl TemplateRegistry {
    /// Creates the registry of built-in templates
    pub fn builtin() -> Self {
        Self {
            templates: builtin::all(),
        }
    }

    /// Lists templates in registration order
    pub fn list(&self) -> &[TemplateSchema] {
        &self.templates
    }

    /// Gets a template by id
    pub fn get(&self, id: &str) -> Option<&TemplateSchema> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Gets a template by id, failing for unknown ids
    pub fn require(&self, id: &str) -> Result<&TemplateSchema, TemplateError> {
        self.get(id)
            .ok_or_else(|| TemplateError::UnknownSchema(id.to_string()))
    }

    /// Returns true if a template with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
