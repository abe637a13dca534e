//! Edit session state machine
//!
//! Interactive callers edit a document, save it asynchronously, and receive
//! remote updates for the same document. [`EditSession`] decides which of
//! those results may be applied:
//!
//! ```text
//!            record_edit            begin_save
//!  Clean ──────────────▶ Editing ──────────────▶ Saving
//!    ▲                    ▲  ▲                     │
//!    │                    │  └── record_edit ──────┤
//!    │                    └───── fail_save ────────┤
//!    └──────────── complete_save (current seq) ────┘
//! ```
//!
//! Every edit bumps a monotonic sequence number. A save started for sequence
//! `n` only returns the session to `Clean` if no edit happened since; remote
//! content is only accepted while `Clean`.

use serde::Serialize;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Local content matches what was last saved or fetched
    #[default]
    Clean,

    /// Local edits are not saved yet
    Editing,

    /// A save is in flight
    Saving,
}

/// Proof that a save was started for a given edit sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    seq: u64,
}

impl SaveTicket {
    /// Edit sequence number the save covers
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Result of completing a save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The save covered the latest edit; the session is clean
    Applied,

    /// Newer edits happened while saving; the result must be discarded
    Stale,
}

/// Decision on a remote update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalUpdate {
    /// Apply the remote content
    Accept,

    /// Drop it; local edits take precedence
    Drop,
}

/// Tracks edit/save ordering for one open document
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: SessionState,
    seq: u64,
}

impl EditSession {
    /// Creates a clean session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Latest edit sequence number
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Records a local edit and returns its sequence number
    pub fn record_edit(&mut self) -> u64 {
        self.seq += 1;
        self.state = SessionState::Editing;
        tracing::trace!(seq = self.seq, "edit recorded");
        self.seq
    }

    /// Starts a save of the current content. Returns `None` if there is
    /// nothing to save or a save is already running.
    pub fn begin_save(&mut self) -> Option<SaveTicket> {
        if self.state != SessionState::Editing {
            return None;
        }
        self.state = SessionState::Saving;
        Some(SaveTicket { seq: self.seq })
    }

    /// Completes a save started with `ticket`
    pub fn complete_save(&mut self, ticket: SaveTicket) -> SaveOutcome {
        if ticket.seq != self.seq {
            tracing::debug!(ticket = ticket.seq, current = self.seq, "discarding stale save");
            return SaveOutcome::Stale;
        }
        if self.state == SessionState::Saving {
            self.state = SessionState::Clean;
        }
        SaveOutcome::Applied
    }

    /// Marks a save as failed; the content still needs saving
    pub fn fail_save(&mut self, ticket: SaveTicket) {
        if ticket.seq == self.seq && self.state == SessionState::Saving {
            self.state = SessionState::Editing;
        }
    }

    /// Decides whether remote content may replace local content
    pub fn offer_external(&self) -> ExternalUpdate {
        match self.state {
            SessionState::Clean => ExternalUpdate::Accept,
            SessionState::Editing | SessionState::Saving => ExternalUpdate::Drop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_clean() {
        let session = EditSession::new();
        assert_eq!(session.state(), SessionState::Clean);
        assert_eq!(session.seq(), 0);
        assert_eq!(session.offer_external(), ExternalUpdate::Accept);
    }

    #[test]
    fn edits_are_numbered_monotonically() {
        let mut session = EditSession::new();
        assert_eq!(session.record_edit(), 1);
        assert_eq!(session.record_edit(), 2);
        assert_eq!(session.state(), SessionState::Editing);
    }

    #[test]
    fn save_of_latest_edit_cleans_session() {
        let mut session = EditSession::new();
        session.record_edit();

        let ticket = session.begin_save().unwrap();
        assert_eq!(session.state(), SessionState::Saving);

        assert_eq!(session.complete_save(ticket), SaveOutcome::Applied);
        assert_eq!(session.state(), SessionState::Clean);
    }

    #[test]
    fn save_overtaken_by_edit_is_stale() {
        let mut session = EditSession::new();
        session.record_edit();
        let ticket = session.begin_save().unwrap();

        session.record_edit();
        assert_eq!(session.state(), SessionState::Editing);

        assert_eq!(session.complete_save(ticket), SaveOutcome::Stale);
        assert_eq!(session.state(), SessionState::Editing);
    }

    #[test]
    fn nothing_to_save_when_clean_or_saving() {
        let mut session = EditSession::new();
        assert!(session.begin_save().is_none());

        session.record_edit();
        assert!(session.begin_save().is_some());
        assert!(session.begin_save().is_none());
    }

    #[test]
    fn failed_save_returns_to_editing() {
        let mut session = EditSession::new();
        session.record_edit();
        let ticket = session.begin_save().unwrap();

        session.fail_save(ticket);
        assert_eq!(session.state(), SessionState::Editing);
        assert!(session.begin_save().is_some());
    }

    #[test]
    fn external_updates_dropped_while_dirty() {
        let mut session = EditSession::new();
        session.record_edit();
        assert_eq!(session.offer_external(), ExternalUpdate::Drop);

        let ticket = session.begin_save().unwrap();
        assert_eq!(session.offer_external(), ExternalUpdate::Drop);

        session.complete_save(ticket);
        assert_eq!(session.offer_external(), ExternalUpdate::Accept);
    }
}
