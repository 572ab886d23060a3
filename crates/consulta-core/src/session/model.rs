//! Read-only session view.

use serde::{Deserialize, Serialize};

use super::history::HistoryItem;
use super::message::Message;

/// An owned, immutable view of the session handed to the presentation
/// layer. Mutating a snapshot never affects the session it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The transcript, in display order.
    pub messages: Vec<Message>,
    /// Submitted queries, most recent first.
    pub history: Vec<HistoryItem>,
    /// True while a request is in flight.
    pub pending: bool,
}
