//! Single-in-flight request lifecycle.
//!
//! The coordinator turns one accepted query into exactly one agent call
//! and translates the outcome into the assistant turn. Every failure is
//! absorbed here: the presentation layer only ever sees messages.

use std::sync::Arc;
use std::time::Duration;

use consulta_core::ConsultaError;
use consulta_core::agent::QueryAgent;
use consulta_core::session::Message;
use tracing::{debug, warn};

/// Generic failure text shown in place of the technical error.
pub const FAILURE_REPLY: &str = "❌ Lo siento, encontré un problema técnico al consultar la base de datos.\n\n\
Por favor intenta reformular tu pregunta de manera más sencilla o verifica la conexión.";

/// Drives one outbound query at a time against the remote agent.
pub struct RequestCoordinator {
    agent: Arc<dyn QueryAgent>,
    timeout: Duration,
}

impl RequestCoordinator {
    /// Creates a coordinator with the given agent and per-request deadline.
    pub fn new(agent: Arc<dyn QueryAgent>, timeout: Duration) -> Self {
        Self { agent, timeout }
    }

    /// Runs one accepted query to completion and returns the assistant turn.
    ///
    /// Never fails outward: transport, status, application, and timeout
    /// errors all collapse into a single generic `is_error` reply, and the
    /// technical cause is only logged.
    pub async fn dispatch(&self, query: &str) -> Message {
        debug!(query_len = query.len(), "dispatching query to agent");

        let outcome = match tokio::time::timeout(self.timeout, self.agent.execute(query)).await {
            Ok(result) => result,
            Err(_) => Err(ConsultaError::timeout(self.timeout.as_secs())),
        };

        match outcome {
            Ok(output) => Message::assistant(output),
            Err(err) => {
                warn!(error = %err, "agent query failed");
                Message::assistant_error(FAILURE_REPLY)
            }
        }
    }
}
