//! Section parser
//!
//! Splits a document body into the sections of a template. Parsing is
//! total: headings that cannot be found leave their section empty, and the
//! result always has one entry per template section, in template order.
//!
//! Boundaries are only the lines the template itself recognizes (its
//! headings, its clause keywords, and the title line), so unknown headings
//! such as `### Option A` stay inside the section that contains them.

use crate::domain::{SectionContent, Sections};
use crate::template::{SectionMarker, TemplateSchema};

/// Parses `body` against `schema`
pub fn parse(body: &str, schema: &TemplateSchema) -> Sections {
    let lines: Vec<&str> = body.lines().collect();
    let layout = Layout::scan(&lines, schema);

    let mut sections = Sections::with_capacity(schema.sections.len());
    let mut cursor = 0;

    for (index, spec) in schema.sections.iter().enumerate() {
        let raw = match spec.marker {
            SectionMarker::Title => layout
                .title
                .map(|at| title_text(lines[at]).to_string())
                .unwrap_or_default(),

            SectionMarker::Body => body.trim().to_string(),

            SectionMarker::Heading(_) => match layout.find_heading(index, cursor) {
                Some(at) => {
                    cursor = at + 1;
                    let end = layout.next_boundary(at + 1, false);
                    join_trimmed(&lines[at + 1..end])
                }
                None => String::new(),
            },

            SectionMarker::Clause(_) => match layout.find_anywhere(index) {
                Some(at) => {
                    let first = spec.marker.clause_rest(lines[at]).unwrap_or_default();
                    let end = layout.next_boundary(at + 1, true);
                    let mut text = first.to_string();
                    for line in &lines[at + 1..end] {
                        text.push('\n');
                        text.push_str(line);
                    }
                    text.trim().to_string()
                }
                None => String::new(),
            },
        };

        sections.insert(spec.id.to_string(), SectionContent::from_text(spec.kind, raw));
    }

    tracing::debug!(
        template = schema.id,
        found = sections.values().filter(|s| !s.is_empty()).count(),
        total = sections.len(),
        "parsed sections"
    );

    sections
}

/// Returns true if `line` is a level-one heading
pub fn is_title_line(line: &str) -> bool {
    line.starts_with("# ") || line.trim_end() == "#"
}

fn title_text(line: &str) -> &str {
    line[1..].trim()
}

fn join_trimmed(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}

/// Which lines of the body the template recognizes
struct Layout<'a> {
    lines: &'a [&'a str],

    /// Index of the owning section for heading and clause lines
    owners: Vec<Option<usize>>,

    /// The title line, if the template has a title and one was found
    title: Option<usize>,
}

impl<'a> Layout<'a> {
    fn scan(lines: &'a [&'a str], schema: &TemplateSchema) -> Self {
        let has_title = schema
            .sections
            .iter()
            .any(|s| s.marker == SectionMarker::Title);

        let title = if has_title {
            lines.iter().position(|line| is_title_line(line))
        } else {
            None
        };

        let owners = lines
            .iter()
            .map(|line| {
                schema.sections.iter().position(|spec| {
                    spec.marker.is_heading_line(line) || spec.marker.clause_rest(line).is_some()
                })
            })
            .collect();

        Self {
            lines,
            owners,
            title,
        }
    }

    fn is_boundary(&self, at: usize) -> bool {
        self.owners[at].is_some() || self.title == Some(at)
    }

    /// First heading of section `index` at or after `cursor`, as long as
    /// no heading of a later section comes first
    fn find_heading(&self, index: usize, cursor: usize) -> Option<usize> {
        for at in cursor..self.lines.len() {
            match self.owners[at] {
                Some(owner) if owner == index => return Some(at),
                Some(owner) if owner > index => return None,
                _ => {}
            }
        }
        None
    }

    fn find_anywhere(&self, index: usize) -> Option<usize> {
        self.owners.iter().position(|owner| *owner == Some(index))
    }

    /// First boundary line at or after `from`; clauses also stop at any
    /// `##` heading
    fn next_boundary(&self, from: usize, clause: bool) -> usize {
        (from..self.lines.len())
            .find(|&at| {
                self.is_boundary(at) || (clause && self.lines[at].trim_start().starts_with("##"))
            })
            .unwrap_or(self.lines.len())
    }
}
