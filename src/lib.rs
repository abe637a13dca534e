//! adrkit - Template-driven transcoder for architecture decision records
//!
//! Documents are Markdown with an optional metadata block. A template
//! (MADR minimal, MADR full, Y-statement or free-form) says which headings
//! or clause keywords delimit each section. The library parses a document
//! into sections, renders sections back into a document, and guesses the
//! template of an unknown document.
//!
//! ```
//! use adrkit::{GenerateOptions, Transcoder};
//!
//! let transcoder = Transcoder::builtin().unwrap();
//! let text = "# Use React\n\n## Context and Problem Statement\n\nWe need a UI library.\n";
//!
//! let doc = transcoder.parse(text, "madr-minimal").unwrap();
//! assert_eq!(doc.title(), "Use React");
//! assert_eq!(doc.text("context"), "We need a UI library.");
//! assert_eq!(transcoder.classify(text), "free-form");
//! ```

pub mod cli;
pub mod document;
pub mod domain;
pub mod storage;
pub mod template;

pub use document::{DetectorError, Transcoder};
pub use domain::{
    DocumentStatus, EditSession, Fields, FrontmatterValue, GenerateOptions, ParsedDocument,
    SectionContent, Sections,
};
pub use template::{TemplateError, TemplateRegistry, TemplateSchema};
