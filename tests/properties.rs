//! Property tests for the transcoder
//!
//! Generated documents use text that never collides with the lines a
//! template recognizes (headings, clause keywords, the title line), which is
//! the condition under which generate and parse are inverses.

use adrkit::document::{frontmatter, parser, FrontmatterBlock};
use adrkit::domain::{extract_list_items, render_bullets};
use adrkit::template::{builtin, SectionKind};
use adrkit::{
    DocumentStatus, Fields, FrontmatterValue, GenerateOptions, SectionContent, Sections,
    TemplateSchema, Transcoder,
};
use chrono::NaiveDate;
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

/// A line of prose that starts with a capital letter
fn prose_line() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,8}( [a-z0-9]{1,8}){0,6}"
        .prop_filter("clause keyword", |line| !line.starts_with("In "))
}

fn paragraph() -> impl Strategy<Value = String> {
    prop::collection::vec(prose_line(), 0..3).prop_map(|lines| lines.join("\n"))
}

fn list_item() -> impl Strategy<Value = String> {
    "[a-z]([a-z0-9 ]{0,15}[a-z0-9])?"
}

/// A single-line item with loose edges, stray markers or nothing but blanks
fn ragged_list_item() -> impl Strategy<Value = String> {
    "[ \t]{0,2}[*a-z -]{0,10}[ \t]{0,2}"
}

/// Quoted metadata text, including the characters the encoder escapes
fn quoted_text() -> impl Strategy<Value = String> {
    "[a-z0-9 :,\"\\\\\n\r]{0,12}"
}

fn content(kind: SectionKind) -> BoxedStrategy<SectionContent> {
    match kind {
        SectionKind::Title => prop_oneof![Just(String::new()), prose_line()]
            .prop_map(|title| SectionContent::paragraph(title))
            .boxed(),
        SectionKind::Paragraph => paragraph()
            .prop_map(|text| SectionContent::paragraph(text))
            .boxed(),
        SectionKind::List => prop::collection::vec(list_item(), 0..4)
            .prop_map(|items| SectionContent::list(items))
            .boxed(),
    }
}

/// A template plus content for every one of its sections
fn document() -> impl Strategy<Value = (TemplateSchema, Sections)> {
    prop::sample::select(builtin::all()).prop_flat_map(|schema| {
        let ids: Vec<&'static str> = schema.section_ids().collect();
        let contents: Vec<_> = schema.sections.iter().map(|s| content(s.kind)).collect();

        (Just(schema), contents).prop_map(move |(schema, contents)| {
            let sections = ids.iter().map(|id| id.to_string()).zip(contents).collect();
            (schema, sections)
        })
    })
}

fn field_key() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,8}".prop_filter("reserved key", |k| {
        !matches!(k.as_str(), "status" | "tags" | "template")
    })
}

fn field_value() -> impl Strategy<Value = FrontmatterValue> {
    prop_oneof![
        quoted_text().prop_map(FrontmatterValue::String),
        prop::collection::vec(quoted_text(), 0..3).prop_map(FrontmatterValue::List),
        "[a-z0-9][a-z0-9.-]{0,8}".prop_map(FrontmatterValue::Scalar),
    ]
}

fn fields() -> impl Strategy<Value = Fields> {
    prop::collection::vec((field_key(), field_value()), 0..4)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn status() -> impl Strategy<Value = Option<DocumentStatus>> {
    prop::option::of(prop::sample::select(DocumentStatus::all().to_vec()))
}

fn options() -> impl Strategy<Value = GenerateOptions> {
    (
        status(),
        prop::option::of(prop::collection::vec(list_item(), 0..3)),
        fields(),
        any::<bool>(),
    )
        .prop_map(|(status, tags, fields, leading_comment)| GenerateOptions {
            status,
            tags,
            frontmatter: Some(fields),
            leading_comment,
            ..GenerateOptions::on(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
        })
}

/// Arbitrary bodies mixing recognized lines with noise
fn any_body() -> impl Strategy<Value = String> {
    let mut recognized = vec!["# Title".to_string(), "#".to_string()];
    recognized.extend(
        [
            builtin::CONTEXT_HEADING,
            builtin::OPTIONS_HEADING,
            builtin::OUTCOME_HEADING,
            builtin::CONSEQUENCES_HEADING,
            builtin::MORE_INFO_HEADING,
            "* item",
        ]
        .iter()
        .chain(builtin::Y_CLAUSES.iter())
        .map(|line| line.to_string()),
    );

    let line = prop_oneof![
        prop::sample::select(recognized),
        Just(String::new()),
        ".{0,40}",
    ];
    prop::collection::vec(line, 0..20).prop_map(|lines| lines.join("\n"))
}

// =============================================================================
// Parser Totality
// =============================================================================

proptest! {
    #[test]
    fn parse_yields_every_section_in_order(body in any_body(), schema in prop::sample::select(builtin::all())) {
        let sections = parser::parse(&body, &schema);
        let ids: Vec<&str> = sections.keys().map(String::as_str).collect();
        let expected: Vec<&str> = schema.section_ids().collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn classify_always_names_a_registered_template(body in any_body()) {
        let transcoder = Transcoder::builtin().unwrap();
        let id = transcoder.classify(&body);
        prop_assert!(transcoder.get_template(id).is_some());
    }
}

// =============================================================================
// Generate / Parse Round Trip
// =============================================================================

proptest! {
    #[test]
    fn generated_sections_parse_back((schema, sections) in document(), options in options()) {
        let transcoder = Transcoder::builtin().unwrap();
        let text = transcoder.generate(schema.id, &sections, &options).unwrap();
        let parsed = transcoder.parse(&text, schema.id).unwrap();

        prop_assert_eq!(&parsed.sections, &sections);
        prop_assert_eq!(parsed.status, options.status);
        prop_assert_eq!(parsed.tags, options.tags.clone().filter(|t| !t.is_empty()));

        let supplied = options.frontmatter.clone().unwrap_or_default();
        for (key, value) in &supplied {
            let stored = parsed.frontmatter.as_ref().and_then(|f| f.get(key));
            prop_assert_eq!(stored, Some(value));
        }
    }

    #[test]
    fn regenerating_a_parsed_document_is_stable((schema, sections) in document(), options in options()) {
        let transcoder = Transcoder::builtin().unwrap();
        let text = transcoder.generate(schema.id, &sections, &options).unwrap();
        let parsed = transcoder.parse(&text, schema.id).unwrap();

        prop_assert_eq!(transcoder.regenerate(&parsed).unwrap(), text);
    }

    #[test]
    fn generated_documents_classify_as_their_template((schema, sections) in document()) {
        let transcoder = Transcoder::builtin().unwrap();
        let options = GenerateOptions::on(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        let text = transcoder.generate(schema.id, &sections, &options).unwrap();

        prop_assert_eq!(transcoder.classify(&text), schema.id);
    }
}

// =============================================================================
// Frontmatter and Lists
// =============================================================================

proptest! {
    #[test]
    fn frontmatter_encoding_is_idempotent(fields in fields(), leading_comment in any::<bool>()) {
        let block = FrontmatterBlock {
            fields,
            leading_comment,
            ..FrontmatterBlock::default()
        };
        let once = frontmatter::encode(&block);
        let decoded = frontmatter::decode(&once).block.unwrap_or_default();
        let twice = frontmatter::encode(&decoded);

        prop_assert_eq!(twice, once);
    }

    #[test]
    fn bullets_and_items_are_inverse(items in prop::collection::vec(list_item(), 0..6)) {
        prop_assert_eq!(extract_list_items(&render_bullets(&items)), items);
    }

    #[test]
    fn extracted_items_are_trimmed(items in prop::collection::vec(ragged_list_item(), 0..6)) {
        let expected: Vec<String> = items.iter().map(|item| item.trim().to_string()).collect();
        prop_assert_eq!(extract_list_items(&render_bullets(&items)), expected);
    }

    #[test]
    fn quoted_metadata_decodes_to_the_encoded_fields(fields in fields()) {
        let block = FrontmatterBlock {
            fields,
            ..FrontmatterBlock::default()
        };
        let decoded = frontmatter::decode(&frontmatter::encode(&block)).block.unwrap_or_default();

        prop_assert_eq!(decoded.fields, block.fields);
    }

    #[test]
    fn metadata_rewrite_keeps_body((_, sections) in document(), status in status()) {
        let schema = builtin::madr_minimal();
        let body = adrkit::document::serializer::render_body(&schema, &sections);
        let updated = frontmatter::rewrite(&body, |block| block.status = status);

        prop_assert_eq!(frontmatter::decode(&updated).body, body.as_str());
    }
}
