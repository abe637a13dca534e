//! Frontmatter codec
//!
//! Documents may start with a metadata block:
//!
//! ```text
//! ---
//! # These are optional metadata elements. Feel free to remove any of them.
//! status: "todo"
//! tags: ["architecture", "decision"]
//! date: 2026-01-05
//! ---
//!
//! # Body starts here
//! ```
//!
//! The block is not YAML. Each `key: value` line is typed by shape:
//! `[...]` is a list of strings, `"..."` or `'...'` a string, and anything
//! else a raw scalar kept as written. Scalars always come back as strings;
//! the original type of `3` or `true` is not preserved.

use crate::domain::{DocumentStatus, Fields, FrontmatterValue};

/// Opening and closing line of a block
pub const DELIMITER: &str = "---";

/// Comment line written at the top of a block when requested
pub const COMMENT_LINE: &str =
    "# These are optional metadata elements. Feel free to remove any of them.";

/// Decoded metadata of a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontmatterBlock {
    /// Status, if the `status` field holds a known value
    pub status: Option<DocumentStatus>,

    /// Tags, if the `tags` field is a list. `Some(vec![])` means "no tags"
    /// and removes the key when encoding.
    pub tags: Option<Vec<String>>,

    /// All fields in block order
    pub fields: Fields,

    /// Whether the block carries (or should carry) the comment line
    pub leading_comment: bool,
}

impl FrontmatterBlock {
    /// Creates a block from fields, exposing status and tags
    pub fn from_fields(fields: Fields) -> Self {
        let status = fields
            .get("status")
            .and_then(FrontmatterValue::as_str)
            .and_then(|s| s.parse().ok());
        let tags = fields
            .get("tags")
            .and_then(FrontmatterValue::as_list)
            .map(<[String]>::to_vec);

        Self {
            status,
            tags,
            fields,
            leading_comment: false,
        }
    }

    /// Fields with `status` and `tags` overlaid
    pub fn merged_fields(&self) -> Fields {
        let mut fields = self.fields.clone();

        if let Some(status) = self.status {
            fields.insert(
                "status".to_string(),
                FrontmatterValue::String(status.as_str().to_string()),
            );
        }

        match &self.tags {
            Some(tags) if tags.is_empty() => {
                fields.shift_remove("tags");
            }
            Some(tags) => {
                fields.insert("tags".to_string(), FrontmatterValue::List(tags.clone()));
            }
            None => {}
        }

        fields
    }
}

/// A document split into its metadata block and body
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<'a> {
    /// Text after the block (the whole text if there is no block)
    pub body: &'a str,

    /// The block, if the text starts with one
    pub block: Option<FrontmatterBlock>,
}

/// Splits a leading metadata block from the body
pub fn decode(text: &str) -> Decoded<'_> {
    let Some((inner, body)) = split_block(text) else {
        return Decoded { body: text, block: None };
    };

    let mut fields = Fields::new();
    let mut leading_comment = false;

    for line in inner.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            leading_comment = true;
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            tracing::trace!(line, "skipping frontmatter line without a key");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        fields.insert(key.to_string(), parse_value(value.trim()));
    }

    let mut block = FrontmatterBlock::from_fields(fields);
    block.leading_comment = leading_comment;

    Decoded {
        body,
        block: Some(block),
    }
}

/// Serializes a block. Returns an empty string when no fields remain.
pub fn encode(block: &FrontmatterBlock) -> String {
    let fields = block.merged_fields();
    if fields.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(DELIMITER);
    out.push('\n');

    if block.leading_comment {
        out.push_str(COMMENT_LINE);
        out.push('\n');
    }

    for (key, value) in &fields {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&encode_value(value));
        out.push('\n');
    }

    out.push_str(DELIMITER);
    out.push('\n');
    out
}

/// Joins an encoded block and a body with the separating blank line
pub fn compose(block: &str, body: &str) -> String {
    if block.is_empty() {
        body.to_string()
    } else {
        format!("{}\n{}", block, body)
    }
}

/// Rewrites only the metadata of a document, leaving the body untouched
pub fn rewrite(text: &str, edit: impl FnOnce(&mut FrontmatterBlock)) -> String {
    let decoded = decode(text);
    let mut block = decoded.block.unwrap_or_default();
    edit(&mut block);
    compose(&encode(&block), decoded.body)
}

/// Types a raw value by its shape
pub fn parse_value(value: &str) -> FrontmatterValue {
    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        return FrontmatterValue::List(parse_list(inner));
    }

    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return FrontmatterValue::String(unescape(&value[1..value.len() - 1]));
        }
    }

    FrontmatterValue::Scalar(value.to_string())
}

/// Encodes a value for a `key: value` line. Quoted text escapes `\`, `"`
/// and line breaks so every value stays on its own line. Scalars are
/// written verbatim.
pub fn encode_value(value: &FrontmatterValue) -> String {
    match value {
        FrontmatterValue::String(s) => format!("\"{}\"", escape(s)),
        FrontmatterValue::List(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| format!("\"{}\"", escape(item)))
                .collect();
            format!("[{}]", items.join(", "))
        }
        FrontmatterValue::Scalar(s) => s.clone(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped) => out.push(unescape_char(escaped)),
            None => out.push('\\'),
        }
    }
    out
}

/// Maps the character after a backslash to the character it stands for
fn unescape_char(c: char) -> char {
    match c {
        'n' => '\n',
        'r' => '\r',
        other => other,
    }
}

/// Finds the block at the very start of `text`. Returns the lines between
/// the delimiters and the body after the separator line.
fn split_block(text: &str) -> Option<(&str, &str)> {
    let (first, after_open) = text.split_once('\n')?;
    if first.trim_end_matches('\r') != DELIMITER {
        return None;
    }

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == DELIMITER {
            let inner = &after_open[..offset];
            let rest = &after_open[offset + line.len()..];
            let body = rest
                .strip_prefix("\r\n")
                .or_else(|| rest.strip_prefix('\n'))
                .unwrap_or(rest);
            return Some((inner, body));
        }
        offset += line.len();
    }

    None
}

/// Splits list contents on commas outside quotes
fn parse_list(inner: &str) -> Vec<String> {
    let mut items = Vec::new();
    if inner.trim().is_empty() {
        return items;
    }

    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut quoted = false;
    let mut chars = inner.chars();

    let finish = |current: &mut String, quoted: bool| {
        let item = std::mem::take(current);
        if quoted {
            item
        } else {
            item.trim().to_string()
        }
    };

    while let Some(c) = chars.next() {
        match quote {
            Some(_) if c == '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(unescape_char(escaped));
                }
            }
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == ',' => {
                items.push(finish(&mut current, quoted));
                quoted = false;
            }
            // Anything between a closing quote and the next comma is noise
            None if quoted => {}
            None if (c == '"' || c == '\'') && current.trim().is_empty() => {
                current.clear();
                quote = Some(c);
                quoted = true;
            }
            None => current.push(c),
        }
    }
    items.push(finish(&mut current, quoted));

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, FrontmatterValue)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn list(items: &[&str]) -> FrontmatterValue {
        FrontmatterValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn decode_status_and_tags() {
        let text = "---\nstatus: \"todo\"\ntags: [\"architecture\", \"decision\"]\n---\n\n# Title\n";
        let decoded = decode(text);
        let block = decoded.block.unwrap();

        assert_eq!(block.status, Some(DocumentStatus::Todo));
        assert_eq!(
            block.tags,
            Some(vec!["architecture".to_string(), "decision".to_string()])
        );
        assert_eq!(decoded.body, "# Title\n");
        assert!(!block.leading_comment);
    }

    #[test]
    fn decode_without_block_leaves_text_alone() {
        let text = "# Title\n\n---\nnot: metadata\n---\n";
        let decoded = decode(text);
        assert_eq!(decoded.body, text);
        assert!(decoded.block.is_none());
    }

    #[test]
    fn decode_unterminated_block_is_body() {
        let text = "---\nstatus: todo\n# Title\n";
        let decoded = decode(text);
        assert_eq!(decoded.body, text);
        assert!(decoded.block.is_none());
    }

    #[test]
    fn decode_types_values_by_shape() {
        let text = "---\na: \"quoted\"\nb: 'single'\nc: [x, 'y z', \"w\"]\nd: 42\ne: true\nf: bare words\ng: []\n---\n";
        let block = decode(text).block.unwrap();

        assert_eq!(block.fields["a"], FrontmatterValue::String("quoted".into()));
        assert_eq!(block.fields["b"], FrontmatterValue::String("single".into()));
        assert_eq!(block.fields["c"], list(&["x", "y z", "w"]));
        assert_eq!(block.fields["d"], FrontmatterValue::Scalar("42".into()));
        assert_eq!(block.fields["e"], FrontmatterValue::Scalar("true".into()));
        assert_eq!(block.fields["f"], FrontmatterValue::Scalar("bare words".into()));
        assert_eq!(block.fields["g"], list(&[]));
    }

    #[test]
    fn decode_splits_at_first_colon() {
        let block = decode("---\nlink: https://example.com/a\n---\n").block.unwrap();
        assert_eq!(
            block.fields["link"],
            FrontmatterValue::Scalar("https://example.com/a".into())
        );
    }

    #[test]
    fn decode_comment_sets_flag_and_is_skipped() {
        let text = format!("---\n{}\n\nstatus: done\n---\nbody", COMMENT_LINE);
        let block = decode(&text).block.unwrap();
        assert!(block.leading_comment);
        assert_eq!(block.fields.len(), 1);
        assert_eq!(block.status, Some(DocumentStatus::Done));
    }

    #[test]
    fn decode_ignores_unknown_status() {
        let block = decode("---\nstatus: \"proposed\"\n---\n").block.unwrap();
        assert_eq!(block.status, None);
        assert_eq!(
            block.fields["status"],
            FrontmatterValue::String("proposed".into())
        );
    }

    #[test]
    fn decode_tags_must_be_a_list() {
        let block = decode("---\ntags: architecture\n---\n").block.unwrap();
        assert_eq!(block.tags, None);
    }

    #[test]
    fn decode_handles_crlf() {
        let decoded = decode("---\r\nstatus: \"backlog\"\r\n---\r\n\r\nBody\r\n");
        assert_eq!(decoded.block.unwrap().status, Some(DocumentStatus::Backlog));
        assert_eq!(decoded.body, "Body\r\n");
    }

    #[test]
    fn decode_skips_malformed_lines() {
        let block = decode("---\njust text\n: no key\nok: 1\n---\n").block.unwrap();
        let keys: Vec<_> = block.fields.keys().cloned().collect();
        assert_eq!(keys, vec!["ok"]);
    }

    #[test]
    fn encode_preserves_insertion_order() {
        let block = FrontmatterBlock {
            fields: fields(&[
                ("title", "ADR".into()),
                ("order", FrontmatterValue::Scalar("3".into())),
                ("owners", list(&["a", "b"])),
            ]),
            ..Default::default()
        };

        assert_eq!(
            encode(&block),
            "---\ntitle: \"ADR\"\norder: 3\nowners: [\"a\", \"b\"]\n---\n"
        );
    }

    #[test]
    fn encode_overlays_status_in_place() {
        let block = FrontmatterBlock {
            status: Some(DocumentStatus::InProgress),
            fields: fields(&[("status", "todo".into()), ("date", "2026-01-05".into())]),
            ..Default::default()
        };

        assert_eq!(
            encode(&block),
            "---\nstatus: \"in-progress\"\ndate: \"2026-01-05\"\n---\n"
        );
    }

    #[test]
    fn empty_tags_remove_the_key() {
        let block = FrontmatterBlock {
            tags: Some(vec![]),
            fields: fields(&[("tags", list(&["old"])), ("owner", "me".into())]),
            ..Default::default()
        };

        let encoded = encode(&block);
        assert!(!encoded.contains("tags:"));
        assert!(encoded.contains("owner: \"me\""));
    }

    #[test]
    fn absent_tags_leave_existing_key() {
        let block = FrontmatterBlock {
            tags: None,
            fields: fields(&[("tags", list(&["keep"]))]),
            ..Default::default()
        };

        assert!(encode(&block).contains("tags: [\"keep\"]"));
    }

    #[test]
    fn encode_empty_is_empty_string() {
        assert_eq!(encode(&FrontmatterBlock::default()), "");

        let only_tags_removed = FrontmatterBlock {
            tags: Some(vec![]),
            fields: fields(&[("tags", list(&["x"]))]),
            leading_comment: true,
            ..Default::default()
        };
        assert_eq!(encode(&only_tags_removed), "");
    }

    #[test]
    fn encode_writes_comment_first() {
        let block = FrontmatterBlock {
            status: Some(DocumentStatus::Todo),
            leading_comment: true,
            ..Default::default()
        };
        assert_eq!(
            encode(&block),
            format!("---\n{}\nstatus: \"todo\"\n---\n", COMMENT_LINE)
        );
    }

    #[test]
    fn list_items_with_commas_and_quotes_survive() {
        let value = list(&["a, b", "say \"hi\"", "back\\slash"]);
        let encoded = encode_value(&value);
        assert_eq!(parse_value(&encoded), value);
    }

    #[test]
    fn encode_decode_encode_is_stable() {
        let block = FrontmatterBlock {
            fields: fields(&[
                ("title", "Use Postgres".into()),
                ("tags", list(&["db", "storage"])),
                ("deciders", list(&[])),
                ("status", "done".into()),
            ]),
            leading_comment: true,
            ..Default::default()
        };

        let first = encode(&block);
        let second = encode(&decode(&first).block.unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn scalars_come_back_as_scalar_strings() {
        let block = decode("---\ncount: 7\n---\n").block.unwrap();
        let again = decode(&encode(&block)).block.unwrap();
        assert_eq!(again.fields["count"], FrontmatterValue::Scalar("7".into()));
    }

    #[test]
    fn compose_adds_separator_line() {
        assert_eq!(compose("---\na: 1\n---\n", "Body\n"), "---\na: 1\n---\n\nBody\n");
        assert_eq!(compose("", "Body\n"), "Body\n");
    }

    #[test]
    fn rewrite_keeps_body_and_other_fields() {
        let text = "---\nstatus: \"todo\"\nowner: \"me\"\n---\n\nSome free text.\n";
        let updated = rewrite(text, |block| block.status = Some(DocumentStatus::Done));

        assert_eq!(
            updated,
            "---\nstatus: \"done\"\nowner: \"me\"\n---\n\nSome free text.\n"
        );
    }

    #[test]
    fn rewrite_adds_block_to_plain_text() {
        let updated = rewrite("Plain.\n", |block| {
            block.tags = Some(vec!["x".to_string()]);
        });
        assert_eq!(updated, "---\ntags: [\"x\"]\n---\n\nPlain.\n");
    }

    #[test]
    fn line_breaks_and_quotes_stay_inside_one_value() {
        let block = FrontmatterBlock {
            fields: fields(&[
                ("note", FrontmatterValue::String("a\nb: c".into())),
                ("quote", FrontmatterValue::String("say \"hi\" \\ bye\r\n".into())),
                ("items", list(&["one\ntwo", "\"x\", y", "back\\slash"])),
            ]),
            ..Default::default()
        };

        let text = encode(&block);
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("note: \"a\\nb: c\"\n"));

        let decoded = decode(&text).block.unwrap();
        assert_eq!(decoded.fields, block.fields);
    }

    #[test]
    fn decode_unescapes_quoted_values() {
        let block = decode("---\na: \"x\\ny\"\nb: [\"p\\\"q\", 'r\\ns']\n---\n").block.unwrap();
        assert_eq!(block.fields["a"], FrontmatterValue::String("x\ny".into()));
        assert_eq!(block.fields["b"], list(&["p\"q", "r\ns"]));
    }
}
