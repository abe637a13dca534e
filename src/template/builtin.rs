//! Built-in templates
//!
//! - `madr-minimal` - the short MADR layout: context, options, outcome
//! - `madr-full` - the complete MADR layout with drivers, confirmation,
//!   pros and cons, and a default metadata block
//! - `y-statement` - a single sentence built from fixed clause keywords
//! - `free-form` - no structure; the body is one opaque section

use super::schema::SectionKind::{List, Paragraph, Title};
use super::schema::{SectionMarker, SectionSpec, TemplateSchema};

pub const MADR_MINIMAL: &str = "madr-minimal";
pub const MADR_FULL: &str = "madr-full";
pub const Y_STATEMENT: &str = "y-statement";
pub const FREE_FORM: &str = "free-form";

pub const CONTEXT_HEADING: &str = "## Context and Problem Statement";
pub const DRIVERS_HEADING: &str = "## Decision Drivers";
pub const OPTIONS_HEADING: &str = "## Considered Options";
pub const OUTCOME_HEADING: &str = "## Decision Outcome";
pub const CONSEQUENCES_HEADING: &str = "### Consequences";
pub const CONFIRMATION_HEADING: &str = "### Confirmation";
pub const PROS_CONS_HEADING: &str = "## Pros and Cons of the Options";
pub const MORE_INFO_HEADING: &str = "## More Information";

/// Y-statement clause keywords, in sentence order
pub const Y_CLAUSES: [&str; 6] = [
    "In the context of",
    "facing",
    "we decided for",
    "and against",
    "to achieve",
    "accepting that",
];

fn title() -> SectionSpec {
    SectionSpec::new(
        "title",
        SectionMarker::Title,
        Title,
        true,
        "Short title of the solved problem and solution",
    )
}

fn context() -> SectionSpec {
    SectionSpec::new(
        "context",
        SectionMarker::Heading(CONTEXT_HEADING),
        Paragraph,
        true,
        "Describe the context and problem statement in two to three sentences. \
         You may want to articulate the problem as a question.",
    )
}

fn options() -> SectionSpec {
    SectionSpec::new(
        "options",
        SectionMarker::Heading(OPTIONS_HEADING),
        List,
        true,
        "Title of option 1\nTitle of option 2\nTitle of option 3",
    )
}

fn decision() -> SectionSpec {
    SectionSpec::new(
        "decision",
        SectionMarker::Heading(OUTCOME_HEADING),
        Paragraph,
        true,
        "Chosen option: \"title of option 1\", because it is the only option that \
         meets the key decision driver.",
    )
}

fn consequences() -> SectionSpec {
    SectionSpec::new(
        "consequences",
        SectionMarker::Heading(CONSEQUENCES_HEADING),
        List,
        false,
        "Good, because it improves one quality attribute\nBad, because it worsens another",
    )
}

fn more_info() -> SectionSpec {
    SectionSpec::new(
        "more_info",
        SectionMarker::Heading(MORE_INFO_HEADING),
        Paragraph,
        false,
        "Additional evidence, links to related decisions, or when to revisit this one.",
    )
}

/// Minimal MADR: title, context, options, outcome, consequences
pub fn madr_minimal() -> TemplateSchema {
    TemplateSchema {
        id: MADR_MINIMAL,
        name: "MADR (minimal)",
        description: "Short decision record: context, considered options, outcome and consequences",
        sections: vec![title(), context(), options(), decision(), consequences()],
        synthesizes_metadata: false,
    }
}

/// Full MADR with drivers, confirmation, pros and cons, and metadata
pub fn madr_full() -> TemplateSchema {
    TemplateSchema {
        id: MADR_FULL,
        name: "MADR (full)",
        description: "Complete decision record with drivers, confirmation, pros and cons and metadata",
        sections: vec![
            title(),
            context(),
            SectionSpec::new(
                "drivers",
                SectionMarker::Heading(DRIVERS_HEADING),
                List,
                false,
                "Decision driver 1, e.g. a force or facing concern\nDecision driver 2",
            ),
            options(),
            decision(),
            consequences(),
            SectionSpec::new(
                "confirmation",
                SectionMarker::Heading(CONFIRMATION_HEADING),
                Paragraph,
                false,
                "Describe how the implementation of or compliance with the decision is confirmed.",
            ),
            SectionSpec::new(
                "pros_cons",
                SectionMarker::Heading(PROS_CONS_HEADING),
                Paragraph,
                false,
                "### Title of option 1\n\n* Good, because argument a\n* Bad, because argument b",
            ),
            more_info(),
        ],
        synthesizes_metadata: true,
    }
}

/// Y-statement: one sentence driven by clause keywords
pub fn y_statement() -> TemplateSchema {
    let clause = |id: &'static str, keyword: &'static str, placeholder: &'static str| {
        SectionSpec::new(id, SectionMarker::Clause(keyword), Paragraph, true, placeholder)
    };

    TemplateSchema {
        id: Y_STATEMENT,
        name: "Y-statement",
        description: "Decision captured as a single sentence of fixed clauses",
        sections: vec![
            title(),
            clause("context", Y_CLAUSES[0], "<use case or component>,"),
            clause("facing", Y_CLAUSES[1], "<non-functional concern>,"),
            clause("decision", Y_CLAUSES[2], "<option>"),
            clause("neglected", Y_CLAUSES[3], "<other options>,"),
            clause("achieve", Y_CLAUSES[4], "<system quality or desired consequence>,"),
            clause("accepting", Y_CLAUSES[5], "<downside or undesired consequence>."),
            more_info(),
        ],
        synthesizes_metadata: false,
    }
}

/// Free-form: the whole body is one section
pub fn free_form() -> TemplateSchema {
    TemplateSchema {
        id: FREE_FORM,
        name: "Free-form",
        description: "Unstructured document; the body is kept as a single section",
        sections: vec![SectionSpec::new(
            "body",
            SectionMarker::Body,
            Paragraph,
            false,
            "Write the decision in any structure you like.",
        )],
        synthesizes_metadata: false,
    }
}

/// All built-in templates, in listing order
pub fn all() -> Vec<TemplateSchema> {
    vec![madr_minimal(), madr_full(), y_statement(), free_form()]
}
