//! Interaction layer for Consulta.
//!
//! `SessionController` is the only component the presentation layer talks
//! to: it owns the session state, guards submissions, drives the request
//! coordinator, and publishes state-change events to subscribers.

pub mod coordinator;
pub mod sql_agent_client;

pub use coordinator::{FAILURE_REPLY, RequestCoordinator};
pub use sql_agent_client::SqlAgentClient;

use std::sync::Arc;
use std::time::Duration;

use consulta_core::agent::QueryAgent;
use consulta_core::config::ConsultaConfig;
use consulta_core::session::{
    Message, SessionEvent, SessionSnapshot, SessionState, SubmitRejection,
};
use tokio::sync::{RwLock, mpsc};

/// Outcome of a submission as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The query was accepted and has settled; the assistant turn is attached.
    Completed { reply: Message },
    /// Empty or whitespace-only input; nothing was recorded.
    RejectedEmpty,
    /// A request is already in flight; nothing was recorded.
    RejectedBusy,
}

/// Owns the conversation for one session.
///
/// The `SessionController`:
/// - Seeds the welcome turn on creation
/// - Accepts submissions and enforces the single-in-flight guard
/// - Maps agent outcomes into assistant turns via [`RequestCoordinator`]
/// - Exposes read-only snapshots and an event subscription
///
/// All mutation happens behind one `RwLock`; the lock is never held across
/// the network call, so the presentation layer can keep reading snapshots
/// while a request is in flight.
pub struct SessionController {
    state: Arc<RwLock<SessionState>>,
    coordinator: RequestCoordinator,
    draft: Arc<RwLock<String>>,
    subscribers: Arc<RwLock<Vec<mpsc::UnboundedSender<SessionEvent>>>>,
    welcome_message: Option<String>,
}

impl SessionController {
    /// Creates a controller for a fresh session.
    ///
    /// # Arguments
    ///
    /// * `agent` - Client for the remote query agent
    /// * `config` - Timeout, history policy, and welcome turn
    pub fn new(agent: Arc<dyn QueryAgent>, config: &ConsultaConfig) -> Self {
        let mut state = SessionState::with_history_limit(config.history_limit);
        if let Some(text) = &config.welcome_message {
            state.append_message(Message::assistant(text));
        }

        Self {
            state: Arc::new(RwLock::new(state)),
            coordinator: RequestCoordinator::new(
                agent,
                Duration::from_secs(config.request_timeout_secs),
            ),
            draft: Arc::new(RwLock::new(String::new())),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            welcome_message: config.welcome_message.clone(),
        }
    }

    /// Submits a query and drives it to completion.
    ///
    /// Phase 1 (synchronous, before the network call): the user turn and
    /// the history entry are recorded and the pending flag is raised.
    /// Phase 2 (after the call settles): the assistant turn, success or
    /// failure, is appended and the pending flag clears.
    ///
    /// Empty input and submissions while a request is in flight are
    /// rejected without any side effect.
    pub async fn submit_query(&self, input: &str) -> SubmitOutcome {
        let accepted = {
            let mut state = self.state.write().await;
            match state.begin_submission(input) {
                Ok(accepted) => accepted,
                Err(SubmitRejection::Empty) => return SubmitOutcome::RejectedEmpty,
                Err(SubmitRejection::Busy) => return SubmitOutcome::RejectedBusy,
            }
        };

        self.publish(SessionEvent::MessageAppended {
            message: accepted.user_message.clone(),
        })
        .await;
        self.publish(SessionEvent::HistoryRecorded {
            entry: accepted.history_entry.clone(),
        })
        .await;
        self.publish(SessionEvent::PendingChanged { pending: true })
            .await;

        // The lock is released here: the state stays readable while the
        // call is in flight, and the pending guard rejects re-entry.
        let reply = self.coordinator.dispatch(&accepted.query).await;

        {
            let mut state = self.state.write().await;
            state.complete_submission(reply.clone());
        }

        self.publish(SessionEvent::MessageAppended {
            message: reply.clone(),
        })
        .await;
        self.publish(SessionEvent::PendingChanged { pending: false })
            .await;

        SubmitOutcome::Completed { reply }
    }

    /// Re-submits the stored query text of a history entry.
    ///
    /// Runs through the same path as a fresh submission; the entry itself
    /// is never mutated. Returns `None` if no entry has the given ID.
    pub async fn select_history_entry(&self, id: &str) -> Option<SubmitOutcome> {
        let query = {
            let state = self.state.read().await;
            state.history().find(id).map(|entry| entry.query.clone())
        };

        match query {
            Some(query) => Some(self.submit_query(&query).await),
            None => None,
        }
    }

    /// Returns an owned, read-only view of the session.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }

    /// True while a request is in flight.
    pub async fn pending(&self) -> bool {
        self.state.read().await.pending()
    }

    /// Subscribes to state-change events.
    ///
    /// Sends are non-blocking; a subscriber that drops its receiver is
    /// pruned on the next publish.
    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.write().await.push(tx);
        rx
    }

    /// Replaces the compose draft.
    pub async fn set_draft(&self, text: impl Into<String>) {
        *self.draft.write().await = text.into();
    }

    /// Returns the current compose draft.
    pub async fn draft(&self) -> String {
        self.draft.read().await.clone()
    }

    /// Clears the compose draft. A pure UI convenience: the transcript and
    /// the history log are untouched.
    pub async fn clear_input(&self) {
        self.draft.write().await.clear();
    }

    /// Replaces the transcript with a freshly seeded one.
    ///
    /// The history log survives; no element is ever edited in place.
    pub async fn clear_session(&self) {
        {
            let mut state = self.state.write().await;
            state.clear_transcript();
            if let Some(text) = &self.welcome_message {
                state.append_message(Message::assistant(text));
            }
        }
        self.publish(SessionEvent::SessionCleared).await;
    }

    async fn publish(&self, event: SessionEvent) {
        self.subscribers
            .write()
            .await
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
