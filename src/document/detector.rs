//! Template detector
//!
//! Guesses the template of a document that has none recorded. This is a
//! best-effort heuristic, not a grammar: each template has a list of line
//! patterns and a threshold, and rules are tried in priority order.
//!
//! | Priority | Template | Patterns | Threshold |
//! |----------|----------|----------|-----------|
//! | 1 | `y-statement` | 6 clause keywords | 4 |
//! | 2 | `madr-full` | 8 headings | 6 |
//! | 3 | `madr-minimal` | 4 headings | 3 |
//! | - | `free-form` | fallback | - |

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::template::builtin;

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("Invalid detection pattern for {template}: {source}")]
    Pattern {
        template: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// One weighted rule of the detection table
#[derive(Debug, Clone)]
pub struct DetectionRule {
    /// Template chosen when the rule passes
    pub template: &'static str,

    /// Minimum number of matching patterns
    pub threshold: usize,

    patterns: Vec<Regex>,
}

impl DetectionRule {
    fn new(
        template: &'static str,
        threshold: usize,
        patterns: Vec<String>,
    ) -> Result<Self, DetectorError> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<_, _>>()
            .map_err(|source| DetectorError::Pattern { template, source })?;

        Ok(Self {
            template,
            threshold,
            patterns,
        })
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the rule has no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Counts how many patterns occur in `text`
    pub fn matches(&self, text: &str) -> usize {
        self.patterns.iter().filter(|re| re.is_match(text)).count()
    }
}

/// Match count of one rule against a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleScore {
    pub template: &'static str,
    pub matched: usize,
    pub total: usize,
    pub threshold: usize,
    pub passed: bool,
}

/// Ordered rule table with a fallback template
#[derive(Debug, Clone)]
pub struct Detector {
    rules: Vec<DetectionRule>,
    fallback: &'static str,
}

impl Detector {
    /// Creates the detector for the built-in templates
    pub fn builtin() -> Result<Self, DetectorError> {
        let clauses = builtin::Y_CLAUSES.iter().map(|k| clause_pattern(k)).collect();

        let full = [
            builtin::CONTEXT_HEADING,
            builtin::DRIVERS_HEADING,
            builtin::OPTIONS_HEADING,
            builtin::OUTCOME_HEADING,
            builtin::CONSEQUENCES_HEADING,
            builtin::CONFIRMATION_HEADING,
            builtin::PROS_CONS_HEADING,
            builtin::MORE_INFO_HEADING,
        ];

        let minimal = [
            builtin::CONTEXT_HEADING,
            builtin::OPTIONS_HEADING,
            builtin::OUTCOME_HEADING,
            builtin::CONSEQUENCES_HEADING,
        ];

        Ok(Self {
            rules: vec![
                DetectionRule::new(builtin::Y_STATEMENT, 4, clauses)?,
                DetectionRule::new(
                    builtin::MADR_FULL,
                    6,
                    full.iter().map(|h| heading_pattern(h)).collect(),
                )?,
                DetectionRule::new(
                    builtin::MADR_MINIMAL,
                    3,
                    minimal.iter().map(|h| heading_pattern(h)).collect(),
                )?,
            ],
            fallback: builtin::FREE_FORM,
        })
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[DetectionRule] {
        &self.rules
    }

    /// Returns the id of the most likely template for `body`
    pub fn classify(&self, body: &str) -> &'static str {
        let template = self
            .rules
            .iter()
            .find(|rule| rule.matches(body) >= rule.threshold)
            .map(|rule| rule.template)
            .unwrap_or(self.fallback);

        tracing::debug!(template, "classified document");
        template
    }

    /// Scores every rule, for diagnostics
    pub fn explain(&self, body: &str) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| {
                let matched = rule.matches(body);
                RuleScore {
                    template: rule.template,
                    matched,
                    total: rule.len(),
                    threshold: rule.threshold,
                    passed: matched >= rule.threshold,
                }
            })
            .collect()
    }
}

// `$` under (?m) stops only before `\n`, so CRLF line ends are matched explicitly
fn heading_pattern(heading: &str) -> String {
    format!(r"(?m)^[ \t]*{}[ \t]*\r?$", regex::escape(heading))
}

fn clause_pattern(keyword: &str) -> String {
    format!(r"(?m)^[ \t]*{}(?:[ \t]|\r?$)", regex::escape(keyword))
}
