//! Document status
//!
//! The closed set of lifecycle states a decision document can carry in its
//! frontmatter. Any other `status` value is kept as a plain field but not
//! exposed as a [`DocumentStatus`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A status string outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown document status: {0}")]
pub struct UnknownStatus(pub String);

/// Status of a decision document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentStatus {
    /// Not started yet
    Todo,

    /// Actively being written or discussed
    InProgress,

    /// Decided
    Done,

    /// Parked for later
    Backlog,
}

impl DocumentStatus {
    /// Returns the wire form used in frontmatter
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Todo => "todo",
            DocumentStatus::InProgress => "in-progress",
            DocumentStatus::Done => "done",
            DocumentStatus::Backlog => "backlog",
        }
    }

    /// Returns all valid status values
    pub fn all() -> &'static [DocumentStatus] {
        &[
            DocumentStatus::Todo,
            DocumentStatus::InProgress,
            DocumentStatus::Done,
            DocumentStatus::Backlog,
        ]
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Exact match only: the set is closed and case matters on the wire.
        match s {
            "todo" => Ok(DocumentStatus::Todo),
            "in-progress" => Ok(DocumentStatus::InProgress),
            "done" => Ok(DocumentStatus::Done),
            "backlog" => Ok(DocumentStatus::Backlog),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}
