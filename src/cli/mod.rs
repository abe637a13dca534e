//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project setup | `init` |
//! | Templates | Template catalogue | `templates list`, `templates show` |
//! | Documents | Transcoding | `parse`, `classify`, `new`, `generate` |
//! | Metadata | Frontmatter only | `meta show`, `meta set` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the global config.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! adrkit --verbose classify docs/adr/0001-use-react.md
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod document_cmd;
mod meta_cmd;
mod output;
mod templates_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
