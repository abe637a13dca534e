//! Section serializer
//!
//! Rebuilds a document from section content. The skeleton written for each
//! template is exactly what [`super::parser`] recognizes, so a generated
//! document parses back to the same sections.

use chrono::NaiveDate;

use super::frontmatter::{self, FrontmatterBlock};
use crate::domain::{
    extract_list_items, render_bullets, Fields, FrontmatterValue, GenerateOptions,
    SectionContent, Sections,
};
use crate::template::{SectionKind, SectionMarker, SectionSpec, TemplateSchema};

/// Renders a full document: metadata block followed by the body
pub fn generate(schema: &TemplateSchema, sections: &Sections, options: &GenerateOptions) -> String {
    let body = render_body(schema, sections);
    let block = metadata_block(schema, options);
    frontmatter::compose(&frontmatter::encode(&block), &body)
}

/// Renders only the body. Headings are always written, even when empty.
pub fn render_body(schema: &TemplateSchema, sections: &Sections) -> String {
    let blocks: Vec<String> = schema
        .sections
        .iter()
        .map(|spec| render_section(spec, sections.get(spec.id)))
        .collect();

    let body = blocks.join("\n\n");
    if body.is_empty() {
        body
    } else {
        body + "\n"
    }
}

/// Default metadata written for templates that always carry a block
pub fn default_metadata(date: NaiveDate) -> Fields {
    let mut fields = Fields::new();
    fields.insert("status".into(), FrontmatterValue::String("proposed".into()));
    fields.insert(
        "date".into(),
        FrontmatterValue::Scalar(date.format("%Y-%m-%d").to_string()),
    );
    for key in ["decision-makers", "consulted", "informed"] {
        fields.insert(key.into(), FrontmatterValue::List(Vec::new()));
    }
    fields
}

/// Builds the block to encode from options, synthesizing defaults if the
/// template asks for them and no fields were supplied
fn metadata_block(schema: &TemplateSchema, options: &GenerateOptions) -> FrontmatterBlock {
    let (fields, leading_comment) = if options.has_fields() {
        (
            options.frontmatter.clone().unwrap_or_default(),
            options.leading_comment,
        )
    } else if schema.synthesizes_metadata {
        (default_metadata(options.date), true)
    } else {
        (Fields::new(), options.leading_comment)
    };

    FrontmatterBlock {
        status: options.status,
        tags: options.tags.clone(),
        fields,
        leading_comment,
    }
}

fn render_section(spec: &SectionSpec, content: Option<&SectionContent>) -> String {
    let text = match (spec.kind, content) {
        (_, None) => String::new(),
        (SectionKind::List, Some(content)) => match content.items() {
            Some(items) => render_bullets(items),
            None => render_bullets(&extract_list_items(content.raw())),
        },
        (SectionKind::Title, Some(content)) => {
            content.raw().lines().map(str::trim).collect::<Vec<_>>().join(" ")
        }
        (SectionKind::Paragraph, Some(content)) => content.raw().trim().to_string(),
    };

    match spec.marker {
        SectionMarker::Title if text.is_empty() => "#".to_string(),
        SectionMarker::Title => format!("# {}", text),
        SectionMarker::Heading(heading) if text.is_empty() => heading.to_string(),
        SectionMarker::Heading(heading) => format!("{}\n\n{}", heading, text),
        SectionMarker::Clause(keyword) if text.is_empty() => keyword.to_string(),
        SectionMarker::Clause(keyword) => format!("{} {}", keyword, text),
        SectionMarker::Body => text,
    }
}
