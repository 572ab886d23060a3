use serde::{Deserialize, Serialize};

use super::history::HistoryItem;
use super::message::Message;

/// State-change notifications published to session subscribers.
///
/// The presentation layer consumes these to re-render without polling;
/// every event carries owned data so subscribers never reach back into
/// the session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A turn was appended to the transcript.
    MessageAppended { message: Message },
    /// A query was recorded in the history log.
    HistoryRecorded { entry: HistoryItem },
    /// The in-flight flag changed.
    PendingChanged { pending: bool },
    /// The transcript was replaced wholesale.
    SessionCleared,
}
