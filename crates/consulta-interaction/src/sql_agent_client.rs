//! HTTP client for the remote query agent.
//!
//! Sends `{"query": ...}` to the configured endpoint and maps transport
//! failures, non-success statuses, and application-level error flags into
//! [`ConsultaError`] values.

use async_trait::async_trait;
use consulta_core::ConsultaError;
use consulta_core::agent::QueryAgent;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Client for the agent endpoint.
///
/// The endpoint contract: POST a JSON body `{"query": <string>}`; a
/// success reply is 2xx with `{"output": <string>, "error"?: <bool>}`.
/// A reply that carries `error: true` is a failure even on 2xx.
#[derive(Debug, Clone)]
pub struct SqlAgentClient {
    client: Client,
    endpoint: String,
}

impl SqlAgentClient {
    /// Creates a new client for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn send_request(&self, query: &str) -> Result<String, ConsultaError> {
        let request = QueryRequest {
            query: query.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| ConsultaError::transport(format!("agent request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read agent error body".to_string());
            return Err(ConsultaError::status(status.as_u16(), body));
        }

        let body = response.text().await.map_err(|err| {
            ConsultaError::transport(format!("failed to read agent response: {err}"))
        })?;

        parse_reply(&body)
    }
}

#[async_trait]
impl QueryAgent for SqlAgentClient {
    async fn execute(&self, query: &str) -> Result<String, ConsultaError> {
        self.send_request(query).await
    }
}

#[derive(Serialize)]
struct QueryRequest {
    query: String,
}

#[derive(Deserialize)]
struct AgentResponse {
    output: String,
    #[serde(default)]
    error: bool,
}

fn parse_reply(body: &str) -> Result<String, ConsultaError> {
    let reply: AgentResponse = serde_json::from_str(body)
        .map_err(|err| ConsultaError::invalid_response(format!("unexpected agent payload: {err}")))?;

    if reply.error {
        return Err(ConsultaError::application(reply.output));
    }

    Ok(reply.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_returns_output() {
        let output = parse_reply(r#"{"output": "5 filas encontradas"}"#).unwrap();
        assert_eq!(output, "5 filas encontradas");
    }

    #[test]
    fn test_parse_reply_tolerates_extra_fields() {
        let body = r#"{"output": "ok", "error": false, "intermediate_steps": []}"#;
        assert_eq!(parse_reply(body).unwrap(), "ok");
    }

    #[test]
    fn test_error_flag_forces_failure_even_with_body() {
        let err = parse_reply(r#"{"output": "Error de configuración", "error": true}"#).unwrap_err();
        assert!(err.is_application());
    }

    #[test]
    fn test_malformed_body_is_invalid_response() {
        let err = parse_reply("<html>504 Gateway Time-out</html>").unwrap_err();
        assert!(matches!(err, ConsultaError::InvalidResponse(_)));

        let err = parse_reply(r#"{"rows": 5}"#).unwrap_err();
        assert!(matches!(err, ConsultaError::InvalidResponse(_)));
    }
}
