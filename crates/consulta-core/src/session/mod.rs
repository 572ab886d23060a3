//! Session domain module.
//!
//! This module contains the conversation models and the session state
//! machine that tracks a single in-flight query.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `Message`)
//! - `transcript`: Append-only log of conversation turns (`Transcript`)
//! - `history`: Log of submitted raw queries (`HistoryItem`, `QueryHistory`)
//! - `state`: Two-phase submission state machine (`SessionState`)
//! - `model`: Read-only view handed to the presentation layer (`SessionSnapshot`)
//! - `event`: State-change notifications for subscribers (`SessionEvent`)

mod event;
mod history;
mod message;
mod model;
mod state;
mod transcript;

// Re-export public API
pub use event::SessionEvent;
pub use history::{HistoryItem, QueryHistory};
pub use message::{Message, MessageRole};
pub use model::SessionSnapshot;
pub use state::{AcceptedSubmission, SessionState, SubmitRejection};
pub use transcript::Transcript;
