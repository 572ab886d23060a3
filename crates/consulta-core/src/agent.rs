//! Service seam to the remote query agent.
//!
//! Defines the interface the session layer uses to run a natural-language
//! query, decoupling it from the concrete transport (HTTP client in
//! production, scripted mocks in tests).

use async_trait::async_trait;

use crate::error::ConsultaError;

/// An abstract client for the remote query-answering agent.
///
/// Implementations turn one validated query string into one answer. They
/// surface every failure as a [`ConsultaError`]; translating failures into
/// user-facing messages is the caller's concern.
#[async_trait]
pub trait QueryAgent: Send + Sync {
    /// Executes one natural-language query against the remote agent.
    ///
    /// # Returns
    ///
    /// - `Ok(output)`: The agent's textual answer
    /// - `Err(_)`: Transport, status, application, or decoding failure
    async fn execute(&self, query: &str) -> Result<String, ConsultaError>;
}
