//! # Storage Layer
//!
//! File access and configuration for the `adrkit` binary. The transcoder
//! itself never touches the filesystem; everything here sits around it.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Documents | Markdown + frontmatter block | anywhere, passed by path |
//! | Project config | TOML | `.adrkit/config.toml` |
//! | Global config | TOML | `~/.config/adrkit/config.toml` |
//!
//! ## Key Types
//!
//! - [`Config`] - Project and global configuration
//! - [`read_document`] / [`write_document`] - Whole-file, atomic document I/O

mod config;
mod files;

pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, PROJECT_DIR};
pub use files::{read_document, write_document};
