//! Parsed document model
//!
//! A [`ParsedDocument`] is what the transcoder hands to the editor layer:
//! one [`SectionContent`] per section of the active template, plus the
//! metadata decoded from the frontmatter block. It is a plain value,
//! produced fresh by every parse and owning nothing else.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::status::DocumentStatus;
use crate::template::SectionKind;

/// Ordered frontmatter fields, in the order they appear in the block
pub type Fields = IndexMap<String, FrontmatterValue>;

/// Ordered section map, keyed by section id in template order
pub type Sections = IndexMap<String, SectionContent>;

/// A frontmatter value, typed by its textual shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
    /// A quoted string (`"..."` or `'...'`)
    String(String),

    /// A bracketed list (`["a", "b"]`)
    List(Vec<String>),

    /// Anything else, kept verbatim (numbers, booleans, dates, bare words)
    Scalar(String),
}

impl FrontmatterValue {
    /// Returns the textual value for strings and scalars
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontmatterValue::String(s) | FrontmatterValue::Scalar(s) => Some(s),
            FrontmatterValue::List(_) => None,
        }
    }

    /// Returns the items of a list value
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FrontmatterValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for FrontmatterValue {
    fn from(value: &str) -> Self {
        FrontmatterValue::String(value.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(value: String) -> Self {
        FrontmatterValue::String(value)
    }
}

impl From<Vec<String>> for FrontmatterValue {
    fn from(items: Vec<String>) -> Self {
        FrontmatterValue::List(items)
    }
}

impl std::fmt::Display for FrontmatterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontmatterValue::String(s) | FrontmatterValue::Scalar(s) => f.write_str(s),
            FrontmatterValue::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

impl Serialize for FrontmatterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FrontmatterValue::String(s) | FrontmatterValue::Scalar(s) => serializer.serialize_str(s),
            FrontmatterValue::List(items) => items.serialize(serializer),
        }
    }
}

/// JSON shapes accepted for a frontmatter value
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFrontmatterValue {
    Text(String),
    List(Vec<String>),
    Bool(bool),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for FrontmatterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawFrontmatterValue::deserialize(deserializer)? {
            RawFrontmatterValue::Text(s) => FrontmatterValue::String(s),
            RawFrontmatterValue::List(items) => FrontmatterValue::List(items),
            RawFrontmatterValue::Bool(b) => FrontmatterValue::Scalar(b.to_string()),
            RawFrontmatterValue::Number(n) => FrontmatterValue::Scalar(n.to_string()),
        })
    }
}

/// Content of one section, shaped by the section's kind in the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    /// Free text (also used for titles and the free-form body)
    Paragraph { raw: String },

    /// Bullet list; `raw` keeps non-bullet lines that `items` drops
    List { raw: String, items: Vec<String> },
}

impl SectionContent {
    /// Creates paragraph content from text
    pub fn paragraph(text: impl Into<String>) -> Self {
        SectionContent::Paragraph {
            raw: text.into().trim().to_string(),
        }
    }

    /// Creates list content from items, rendering `raw` as bullet lines
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let raw = render_bullets(&items);
        SectionContent::List { raw, items }
    }

    /// Creates list content from raw text, extracting bullet items
    pub fn list_from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into().trim().to_string();
        let items = extract_list_items(&raw);
        SectionContent::List { raw, items }
    }

    /// Creates content of the given kind from raw text
    pub fn from_text(kind: SectionKind, text: impl Into<String>) -> Self {
        match kind {
            SectionKind::List => Self::list_from_raw(text),
            SectionKind::Title | SectionKind::Paragraph => Self::paragraph(text),
        }
    }

    /// Empty content of the given kind
    pub fn empty(kind: SectionKind) -> Self {
        Self::from_text(kind, "")
    }

    /// Re-shapes content to match a kind, deriving items from `raw` when needed
    pub fn into_kind(self, kind: SectionKind) -> Self {
        match (kind, self) {
            (SectionKind::List, list @ SectionContent::List { .. }) => list,
            (SectionKind::List, SectionContent::Paragraph { raw }) => Self::list_from_raw(raw),
            (_, SectionContent::List { raw, .. }) => SectionContent::Paragraph { raw },
            (_, paragraph) => paragraph,
        }
    }

    /// Returns the trimmed text of the section
    pub fn raw(&self) -> &str {
        match self {
            SectionContent::Paragraph { raw } | SectionContent::List { raw, .. } => raw,
        }
    }

    /// Returns list items, or `None` for paragraph content
    pub fn items(&self) -> Option<&[String]> {
        match self {
            SectionContent::List { items, .. } => Some(items),
            SectionContent::Paragraph { .. } => None,
        }
    }

    /// Returns true if the section has no text
    pub fn is_empty(&self) -> bool {
        self.raw().is_empty()
    }
}

/// Extracts bullet items (`*` or `-` lines) from section text.
///
/// Each line is trimmed on both sides before the marker is removed, so an
/// item rendered by [`render_bullets`] comes back trimmed. A bare marker
/// yields an empty item.
pub fn extract_list_items(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| line.starts_with('*') || line.starts_with('-'))
        .map(|line| line[1..].trim_start().to_string())
        .collect()
}

/// Renders items as `* item` lines
pub fn render_bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("* {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Metadata options carried into `generate`
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    /// Status to overlay onto the frontmatter
    pub status: Option<DocumentStatus>,

    /// Tags to overlay; `Some(vec![])` removes the `tags` key
    pub tags: Option<Vec<String>>,

    /// Base frontmatter fields
    pub frontmatter: Option<Fields>,

    /// Emit the explanatory comment line at the top of the block
    pub leading_comment: bool,

    /// Date used when a template synthesizes default metadata
    pub date: NaiveDate,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            status: None,
            tags: None,
            frontmatter: None,
            leading_comment: false,
            date: chrono::Local::now().date_naive(),
        }
    }
}

impl GenerateOptions {
    /// Options with a fixed date, for reproducible output
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    /// Returns true if explicit frontmatter fields were supplied
    pub fn has_fields(&self) -> bool {
        self.frontmatter.as_ref().is_some_and(|f| !f.is_empty())
    }
}

/// A document split into template sections plus metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDocument {
    /// Template the document was parsed against
    pub schema_id: String,

    /// One entry per template section, in template order
    pub sections: Sections,

    /// Status, when present and one of the known values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DocumentStatus>,

    /// Tags, when the frontmatter carries a list-valued `tags` field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Every decoded frontmatter field, in block order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Fields>,

    /// Whether the frontmatter block carried comment lines
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub leading_comment: bool,
}

impl ParsedDocument {
    /// Gets a section by id
    pub fn section(&self, id: &str) -> Option<&SectionContent> {
        self.sections.get(id)
    }

    /// Gets the trimmed text of a section, empty if the id is unknown
    pub fn text(&self, id: &str) -> &str {
        self.section(id).map(SectionContent::raw).unwrap_or("")
    }

    /// Returns the title section text
    pub fn title(&self) -> &str {
        self.text("title")
    }

    /// Replaces a section's content, keeping its kind. Unknown ids are ignored.
    pub fn set_section(&mut self, id: &str, content: SectionContent) -> bool {
        match self.sections.get_mut(id) {
            Some(slot) => {
                let kind = match slot {
                    SectionContent::List { .. } => SectionKind::List,
                    SectionContent::Paragraph { .. } => SectionKind::Paragraph,
                };
                *slot = content.into_kind(kind);
                true
            }
            None => false,
        }
    }

    /// Builds options that carry this document's metadata into `generate`
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            status: self.status,
            tags: self.tags.clone(),
            frontmatter: self.frontmatter.clone(),
            leading_comment: self.leading_comment,
            ..GenerateOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_items_strip_markers() {
        let items = extract_list_items("* React\n- Vue\n  *   Svelte\nnot an item");
        assert_eq!(items, vec!["React", "Vue", "Svelte"]);
    }

    #[test]
    fn list_from_raw_keeps_non_bullet_lines_in_raw() {
        let content = SectionContent::list_from_raw("Intro line\n* one\n* two\n");
        assert_eq!(content.raw(), "Intro line\n* one\n* two");
        assert_eq!(content.items().unwrap(), ["one", "two"]);
    }

    #[test]
    fn list_marker_only_strips_one_character() {
        let content = SectionContent::list(vec!["**bold** choice".to_string()]);
        assert_eq!(content.raw(), "* **bold** choice");
        assert_eq!(extract_list_items(content.raw()), vec!["**bold** choice"]);
    }

    #[test]
    fn empty_list_has_empty_raw() {
        let content = SectionContent::list(Vec::<String>::new());
        assert!(content.is_empty());
        assert_eq!(content.items().unwrap().len(), 0);
    }

    #[test]
    fn from_text_follows_kind() {
        assert!(SectionContent::from_text(SectionKind::List, "* a").items().is_some());
        assert!(SectionContent::from_text(SectionKind::Paragraph, "* a")
            .items()
            .is_none());
        assert_eq!(SectionContent::from_text(SectionKind::Title, "  T  ").raw(), "T");
    }

    #[test]
    fn into_kind_converts_both_ways() {
        let list = SectionContent::paragraph("* a\n* b").into_kind(SectionKind::List);
        assert_eq!(list.items().unwrap(), ["a", "b"]);

        let paragraph = list.into_kind(SectionKind::Paragraph);
        assert_eq!(paragraph, SectionContent::paragraph("* a\n* b"));
    }

    #[test]
    fn frontmatter_value_json_shapes() {
        let fields: Fields = serde_json::from_str(
            r#"{"title": "x", "tags": ["a", "b"], "draft": true, "order": 3}"#,
        )
        .unwrap();

        assert_eq!(fields["title"], FrontmatterValue::String("x".into()));
        assert_eq!(
            fields["tags"],
            FrontmatterValue::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(fields["draft"], FrontmatterValue::Scalar("true".into()));
        assert_eq!(fields["order"], FrontmatterValue::Scalar("3".into()));

        let keys: Vec<_> = fields.keys().cloned().collect();
        assert_eq!(keys, vec!["title", "tags", "draft", "order"]);
    }

    #[test]
    fn section_content_serializes_with_kind_tag() {
        let json = serde_json::to_value(SectionContent::list(vec!["a".to_string()])).unwrap();
        assert_eq!(json["kind"], "list");
        assert_eq!(json["items"][0], "a");
    }
}
