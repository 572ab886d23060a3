//! Session state machine.
//!
//! `SessionState` owns the transcript, the query history, and the pending
//! flag, and enforces the submission invariants: at most one in-flight
//! query, no empty submissions, and an explicit two-phase write. The user
//! turn and history entry are recorded synchronously before the network
//! call; the assistant turn strictly after it settles.

use super::history::{HistoryItem, QueryHistory};
use super::message::Message;
use super::model::SessionSnapshot;
use super::transcript::Transcript;

/// Why a submission was refused. Rejections are no-ops on every store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// The input was empty or whitespace-only after trimming.
    Empty,
    /// A request is already in flight.
    Busy,
}

/// The synchronous side effects of an accepted submission.
///
/// Carries owned copies of what was recorded so the caller can publish
/// them to subscribers without re-reading the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedSubmission {
    /// The trimmed query text to send to the agent.
    pub query: String,
    /// The user turn that was appended to the transcript.
    pub user_message: Message,
    /// The entry that was recorded in the history log.
    pub history_entry: HistoryItem,
}

/// Mutable session state, owned exclusively by the session controller.
///
/// All methods are synchronous; the controller serializes access behind a
/// single lock, so no suspension point ever observes a half-applied phase.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    transcript: Transcript,
    history: QueryHistory,
    pending: bool,
}

impl SessionState {
    /// Creates an empty session with an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session with an optional history capacity cap.
    pub fn with_history_limit(limit: Option<usize>) -> Self {
        Self {
            transcript: Transcript::new(),
            history: QueryHistory::with_limit(limit),
            pending: false,
        }
    }

    /// True while a request is in flight.
    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn history(&self) -> &QueryHistory {
        &self.history
    }

    /// Appends a message outside the submission path.
    ///
    /// Used for the welcome turn and inline status decorations; it does not
    /// touch the history log or the pending flag.
    pub fn append_message(&mut self, message: Message) {
        self.transcript.append(message);
    }

    /// Phase 1 of a submission.
    ///
    /// Trims the input and applies the guards: empty input and an in-flight
    /// request are both rejected without any side effect. On acceptance the
    /// user turn is appended, the history entry is recorded, and the
    /// pending flag is raised, all before the caller issues the network
    /// call.
    pub fn begin_submission(&mut self, input: &str) -> Result<AcceptedSubmission, SubmitRejection> {
        let query = input.trim();
        if query.is_empty() {
            return Err(SubmitRejection::Empty);
        }
        if self.pending {
            return Err(SubmitRejection::Busy);
        }

        let user_message = Message::user(query);
        self.transcript.append(user_message.clone());
        let history_entry = self.history.record(query);
        self.pending = true;

        Ok(AcceptedSubmission {
            query: query.to_string(),
            user_message,
            history_entry,
        })
    }

    /// Phase 2 of a submission.
    ///
    /// Appends the assistant turn (success or failure alike) and clears the
    /// pending flag unconditionally; this is the only way it clears, so the
    /// guard in the next submission always sees accurate state.
    pub fn complete_submission(&mut self, reply: Message) {
        self.pending = false;
        self.transcript.append(reply);
    }

    /// Replaces the whole transcript with an empty one.
    ///
    /// The history log survives: it is decoupled from the transcript.
    pub fn clear_transcript(&mut self) {
        self.transcript = Transcript::new();
    }

    /// Returns an owned, read-only view for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.transcript.messages().to_vec(),
            history: self.history.entries().to_vec(),
            pending: self.pending,
        }
    }
}
