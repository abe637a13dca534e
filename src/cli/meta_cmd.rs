//! Metadata CLI commands
//!
//! These touch only the frontmatter block; the body is written back
//! byte-for-byte and no template is involved.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Subcommand;

use super::document_cmd::parse_status;
use super::output::Output;
use crate::document::frontmatter::{self, FrontmatterBlock};
use crate::domain::DocumentStatus;
use crate::storage::{read_document, write_document, Config};

#[derive(Subcommand)]
pub enum MetaCommands {
    /// Show a document's metadata block
    Show {
        /// Document path (- for stdin)
        file: PathBuf,
    },

    /// Update a document's metadata block
    Set {
        /// Document path (- for stdin, result printed to stdout)
        file: PathBuf,

        /// New status (todo, in-progress, done, backlog)
        #[arg(long, short)]
        status: Option<String>,

        /// Replace tags (repeatable)
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,

        /// Remove the tags field
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,

        /// Set a field (key=value, value typed like a block line)
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,

        /// Remove a field (repeatable)
        #[arg(long = "remove", value_name = "KEY")]
        removes: Vec<String>,

        /// Print the result instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn run(cmd: MetaCommands, config: &Config, output: &Output) -> Result<()> {
    match cmd {
        MetaCommands::Show { file } => show(output, &file),
        MetaCommands::Set {
            file,
            status,
            tags,
            clear_tags,
            fields,
            removes,
            dry_run,
        } => {
            let edit = MetaEdit {
                status: status.as_deref().map(parse_status).transpose()?,
                tags: if clear_tags {
                    Some(Vec::new())
                } else if tags.is_empty() {
                    None
                } else {
                    Some(tags)
                },
                fields: fields
                    .iter()
                    .map(|f| parse_assignment(f))
                    .collect::<Result<_>>()?,
                removes,
                emit_comment: config.project.emit_comment,
            };
            set(output, &file, edit, dry_run)
        }
    }
}

fn show(output: &Output, file: &Path) -> Result<()> {
    let text = read_document(file)?;
    let block = frontmatter::decode(&text).block;

    if output.is_json() {
        let value = match &block {
            Some(block) => serde_json::json!({
                "status": block.status,
                "tags": block.tags,
                "fields": block.fields,
                "leading_comment": block.leading_comment,
            }),
            None => serde_json::Value::Null,
        };
        output.data(&value);
        return Ok(());
    }

    match block {
        Some(block) => {
            for (key, value) in &block.fields {
                println!("{}: {}", key, frontmatter::encode_value(value));
            }
        }
        None => println!("No metadata block."),
    }

    Ok(())
}

/// A metadata update, applied to a decoded block
#[derive(Debug, Default)]
struct MetaEdit {
    status: Option<DocumentStatus>,
    tags: Option<Vec<String>>,
    fields: Vec<(String, String)>,
    removes: Vec<String>,
    emit_comment: bool,
}

impl MetaEdit {
    fn apply(self, block: &mut FrontmatterBlock) {
        let created = block.fields.is_empty();

        let mut fields = block.merged_fields();
        for key in &self.removes {
            fields.shift_remove(key);
        }
        for (key, value) in self.fields {
            fields.insert(key, frontmatter::parse_value(&value));
        }

        // Re-derive status and tags so field edits to them are not overlaid
        let leading_comment = if created {
            self.emit_comment
        } else {
            block.leading_comment
        };
        *block = FrontmatterBlock::from_fields(fields);
        block.leading_comment = leading_comment;

        if self.status.is_some() {
            block.status = self.status;
        }
        if self.tags.is_some() {
            block.tags = self.tags;
        }
    }
}

fn set(output: &Output, file: &Path, edit: MetaEdit, dry_run: bool) -> Result<()> {
    let text = read_document(file)?;
    let updated = frontmatter::rewrite(&text, |block| edit.apply(block));

    if dry_run || file == Path::new("-") {
        output.document(&updated);
        if output.is_json() {
            output.data(&serde_json::json!({ "content": updated }));
        }
        return Ok(());
    }

    if updated == text {
        output.verbose_ctx("meta", "No changes");
    } else {
        write_document(file, &updated)?;
    }
    output.success(&format!("Updated metadata of {}", file.display()));
    Ok(())
}

fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Invalid field '{}': expected key=value", raw);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Invalid field '{}': empty key", raw);
    }
    Ok((key.to_string(), value.trim().to_string()))
}
