//! # Document Transcoder
//!
//! Converts between raw document text and [`ParsedDocument`]s.
//!
//! ## Data Flow
//!
//! ```text
//! raw text ──▶ frontmatter::decode ──▶ parser::parse ──▶ ParsedDocument
//!                                           ▲
//!                                 TemplateRegistry (schema)
//!
//! sections + options ──▶ serializer::generate ──▶ frontmatter::encode ──▶ raw text
//! ```
//!
//! The detector runs only when a document has no template recorded in its
//! `template` frontmatter field.
//!
//! ## Key Types
//!
//! - [`Transcoder`] - Registry and detector, built once and shared
//! - [`FrontmatterBlock`] - Decoded metadata block
//! - [`Detector`] - Weighted rule table for template detection

pub mod detector;
pub mod frontmatter;
pub mod parser;
pub mod serializer;

pub use detector::{DetectionRule, Detector, DetectorError, RuleScore};
pub use frontmatter::{Decoded, FrontmatterBlock};

use crate::domain::{FrontmatterValue, GenerateOptions, ParsedDocument, Sections};
use crate::template::{TemplateError, TemplateRegistry, TemplateSchema};

/// Frontmatter field that records a document's template
pub const TEMPLATE_FIELD: &str = "template";

/// Parses, generates and classifies documents against a template registry.
///
/// Holds no mutable state; one instance can serve any number of callers.
#[derive(Debug, Clone)]
pub struct Transcoder {
    registry: TemplateRegistry,
    detector: Detector,
}

impl Transcoder {
    /// Creates a transcoder over `registry` and `detector`
    pub fn new(registry: TemplateRegistry, detector: Detector) -> Self {
        Self { registry, detector }
    }

    /// Creates a transcoder over the built-in templates and detection rules
    pub fn builtin() -> Result<Self, DetectorError> {
        Ok(Self::new(TemplateRegistry::builtin(), Detector::builtin()?))
    }

    /// The template registry
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// The template detector
    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    /// Lists all templates
    pub fn list_templates(&self) -> &[TemplateSchema] {
        self.registry.list()
    }

    /// Gets a template by id
    pub fn get_template(&self, id: &str) -> Option<&TemplateSchema> {
        self.registry.get(id)
    }

    /// Parses `text` against the template `schema_id`
    pub fn parse(&self, text: &str, schema_id: &str) -> Result<ParsedDocument, TemplateError> {
        let schema = self.registry.require(schema_id)?;
        Ok(self.parse_with(text, schema))
    }

    /// Parses `text` against a template that is already resolved
    pub fn parse_with(&self, text: &str, schema: &TemplateSchema) -> ParsedDocument {
        let decoded = frontmatter::decode(text);
        let sections = parser::parse(decoded.body, schema);

        let mut document = ParsedDocument {
            schema_id: schema.id.to_string(),
            sections,
            status: None,
            tags: None,
            frontmatter: None,
            leading_comment: false,
        };

        if let Some(block) = decoded.block {
            document.status = block.status;
            document.tags = block.tags;
            document.frontmatter = Some(block.fields);
            document.leading_comment = block.leading_comment;
        }

        document
    }

    /// Parses `text` against its recorded template, or a detected one
    pub fn parse_auto(&self, text: &str) -> Result<ParsedDocument, TemplateError> {
        let schema = self.resolve(text)?;
        Ok(self.parse_with(text, schema))
    }

    /// Renders sections and metadata as a document of template `schema_id`
    pub fn generate(
        &self,
        schema_id: &str,
        sections: &Sections,
        options: &GenerateOptions,
    ) -> Result<String, TemplateError> {
        let schema = self.registry.require(schema_id)?;
        Ok(serializer::generate(schema, sections, options))
    }

    /// Renders a parsed (and possibly edited) document back to text
    pub fn regenerate(&self, document: &ParsedDocument) -> Result<String, TemplateError> {
        self.generate(
            &document.schema_id,
            &document.sections,
            &document.generate_options(),
        )
    }

    /// Guesses the template of `text`, ignoring any metadata block
    pub fn classify(&self, text: &str) -> &'static str {
        self.detector.classify(frontmatter::decode(text).body)
    }

    /// Returns the template recorded in the document's `template` field, if
    /// it names a known template
    pub fn recorded_template(&self, text: &str) -> Option<&TemplateSchema> {
        let block = frontmatter::decode(text).block?;
        let id = block.fields.get(TEMPLATE_FIELD).and_then(FrontmatterValue::as_str)?;
        let schema = self.registry.get(id);
        if schema.is_none() {
            tracing::debug!(template = id, "recorded template is not registered");
        }
        schema
    }

    /// Picks the template for `text`: the recorded one wins over detection
    pub fn resolve(&self, text: &str) -> Result<&TemplateSchema, TemplateError> {
        if let Some(schema) = self.recorded_template(text) {
            return Ok(schema);
        }
        self.registry.require(self.classify(text))
    }
}
