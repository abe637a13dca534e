//! Document CLI commands: parse, classify, new, generate

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;

use super::output::Output;
use crate::document::{serializer, Transcoder, TEMPLATE_FIELD};
use crate::domain::{
    DocumentStatus, Fields, FrontmatterValue, GenerateOptions, ParsedDocument, SectionContent,
    Sections,
};
use crate::storage::{read_document, write_document, Config};
use crate::template::{SectionKind, TemplateSchema};

/// Picks the template for a document: explicit id, then the recorded one,
/// then detection (or the configured default when detection is off)
fn pick_template<'a>(
    transcoder: &'a Transcoder,
    config: &Config,
    text: &str,
    explicit: Option<&str>,
) -> Result<&'a TemplateSchema> {
    if let Some(id) = explicit {
        return Ok(transcoder.registry().require(id)?);
    }
    if let Some(schema) = transcoder.recorded_template(text) {
        return Ok(schema);
    }

    let id = if config.project.auto_detect {
        transcoder.classify(text)
    } else {
        config.project.default_template.as_str()
    };
    Ok(transcoder.registry().require(id)?)
}

/// Parses a document and prints its sections
pub fn parse(
    transcoder: &Transcoder,
    config: &Config,
    output: &Output,
    file: &Path,
    template: Option<&str>,
) -> Result<()> {
    let text = read_document(file)?;
    let schema = pick_template(transcoder, config, &text, template)?;
    output.verbose_ctx("parse", &format!("Using template: {}", schema.id));

    let document = transcoder.parse_with(&text, schema);

    if output.is_json() {
        output.data(&document);
    } else {
        print_document(&document);
    }

    Ok(())
}

fn print_document(document: &ParsedDocument) {
    println!("Template: {}", document.schema_id);
    if let Some(status) = document.status {
        println!("Status: {}", status);
    }
    if let Some(tags) = &document.tags {
        println!("Tags: {}", tags.join(", "));
    }

    for (id, content) in &document.sections {
        println!();
        println!("[{}]", id);
        match content.items() {
            Some(items) => {
                for item in items {
                    println!("  * {}", item);
                }
            }
            None => {
                for line in content.raw().lines() {
                    println!("  {}", line);
                }
            }
        }
    }
}

/// Prints the detected template of a document
pub fn classify(transcoder: &Transcoder, output: &Output, file: &Path, explain: bool) -> Result<()> {
    let text = read_document(file)?;
    let template = transcoder.classify(&text);
    let scores = (explain || output.is_verbose())
        .then(|| transcoder.detector().explain(crate::document::frontmatter::decode(&text).body));

    if output.is_json() {
        let mut value = serde_json::json!({ "template": template });
        if let Some(scores) = &scores {
            value["scores"] = serde_json::to_value(scores)?;
        }
        output.data(&value);
        return Ok(());
    }

    println!("{}", template);
    if let Some(scores) = scores {
        for score in scores {
            println!(
                "  {:<14} {}/{} (needs {}){}",
                score.template,
                score.matched,
                score.total,
                score.threshold,
                if score.passed { "  ✓" } else { "" }
            );
        }
    }

    Ok(())
}

/// Options for `adrkit new`
pub struct NewOptions<'a> {
    pub title: &'a str,
    pub template: Option<&'a str>,
    pub status: Option<&'a str>,
    pub tags: &'a [String],
    pub output_path: Option<&'a Path>,
    pub force: bool,
}

/// Writes an empty document skeleton for a template
pub fn new_document(
    transcoder: &Transcoder,
    config: &Config,
    output: &Output,
    opts: NewOptions<'_>,
) -> Result<()> {
    let template = opts.template.unwrap_or(&config.project.default_template);
    let schema = transcoder.registry().require(template)?;
    let status = opts.status.map(parse_status).transpose()?;

    let mut sections = Sections::new();
    for spec in &schema.sections {
        let content = if spec.kind == SectionKind::Title {
            SectionContent::paragraph(opts.title)
        } else {
            SectionContent::empty(spec.kind)
        };
        sections.insert(spec.id.to_string(), content);
    }

    let mut options = GenerateOptions::default();
    let mut fields = if schema.synthesizes_metadata {
        serializer::default_metadata(options.date)
    } else {
        Fields::new()
    };
    fields.insert(TEMPLATE_FIELD.to_string(), FrontmatterValue::Scalar(schema.id.to_string()));
    options.frontmatter = Some(fields);
    options.leading_comment = schema.synthesizes_metadata;
    options.status = status;
    if !opts.tags.is_empty() {
        options.tags = Some(opts.tags.to_vec());
    }

    let content = serializer::generate(schema, &sections, &options);
    emit(output, schema, &content, opts.output_path, opts.force)
}

/// One section in a generate request: text, or a list of items
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SectionInput {
    Text(String),
    Items(Vec<String>),
}

/// JSON request read by `adrkit generate`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GenerateRequest {
    #[serde(default)]
    sections: IndexMap<String, SectionInput>,
    #[serde(default)]
    status: Option<DocumentStatus>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    frontmatter: Option<Fields>,
    #[serde(default)]
    leading_comment: bool,
    #[serde(default)]
    date: Option<NaiveDate>,
}

impl GenerateRequest {
    fn into_parts(self, schema: &TemplateSchema) -> (Sections, GenerateOptions) {
        let mut sections = Sections::new();
        for (id, input) in self.sections {
            let Some(spec) = schema.section(&id) else {
                tracing::warn!(section = %id, template = schema.id, "ignoring unknown section");
                continue;
            };
            let content = match (input, spec.kind) {
                (SectionInput::Items(items), SectionKind::List) => SectionContent::list(items),
                (SectionInput::Items(items), _) => SectionContent::paragraph(items.join("\n")),
                (SectionInput::Text(text), kind) => SectionContent::from_text(kind, text),
            };
            sections.insert(id, content);
        }

        let mut options = match self.date {
            Some(date) => GenerateOptions::on(date),
            None => GenerateOptions::default(),
        };
        options.status = self.status;
        options.tags = self.tags;
        options.frontmatter = self.frontmatter;
        options.leading_comment = self.leading_comment;

        (sections, options)
    }
}

/// Renders a document from a JSON request
pub fn generate(
    transcoder: &Transcoder,
    output: &Output,
    template: &str,
    input: &Path,
    output_path: Option<&Path>,
    force: bool,
) -> Result<()> {
    let schema = transcoder.registry().require(template)?;
    let raw = read_document(input)?;
    let request: GenerateRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid generate request: {}", input.display()))?;

    output.verbose_ctx(
        "generate",
        &format!("{} section(s) supplied for {}", request.sections.len(), schema.id),
    );

    let (sections, options) = request.into_parts(schema);
    let content = serializer::generate(schema, &sections, &options);
    emit(output, schema, &content, output_path, force)
}

/// Writes generated content to a file, or prints it
fn emit(
    output: &Output,
    schema: &TemplateSchema,
    content: &str,
    path: Option<&Path>,
    force: bool,
) -> Result<()> {
    match path {
        Some(path) => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            write_document(path, content)?;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "template": schema.id,
                    "path": path,
                }));
            } else {
                output.success(&format!("Wrote {} ({})", path.display(), schema.id));
            }
        }
        None => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "template": schema.id,
                    "content": content,
                }));
            } else {
                output.document(content);
            }
        }
    }
    Ok(())
}

pub(crate) fn parse_status(value: &str) -> Result<DocumentStatus> {
    Ok(value.parse::<DocumentStatus>()?)
}
