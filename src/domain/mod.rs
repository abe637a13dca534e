//! Domain models for adrkit
//!
//! Contains the document model without any I/O concerns.

mod document;
mod session;
mod status;

pub use document::{
    extract_list_items, render_bullets, Fields, FrontmatterValue, GenerateOptions, ParsedDocument,
    SectionContent, Sections,
};
pub use session::{EditSession, ExternalUpdate, SaveOutcome, SaveTicket, SessionState};
pub use status::{DocumentStatus, UnknownStatus};
