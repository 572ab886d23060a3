//! End-to-end session flow against a scripted agent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use consulta_core::ConsultaError;
use consulta_core::agent::QueryAgent;
use consulta_core::config::ConsultaConfig;
use consulta_core::session::MessageRole;
use consulta_interaction::{FAILURE_REPLY, SessionController, SubmitOutcome};

/// Replays scripted outcomes and records every query it was asked to run.
struct ScriptedAgent {
    script: Mutex<VecDeque<Result<String, ConsultaError>>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedAgent {
    fn new(script: Vec<Result<String, ConsultaError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryAgent for ScriptedAgent {
    async fn execute(&self, query: &str) -> Result<String, ConsultaError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("ok".to_string()))
    }
}

fn quiet_config() -> ConsultaConfig {
    ConsultaConfig {
        welcome_message: None,
        ..ConsultaConfig::default()
    }
}

#[tokio::test]
async fn test_successful_query_renders_agent_output() {
    let agent = Arc::new(ScriptedAgent::new(vec![Ok("5 filas...".to_string())]));
    let controller = SessionController::new(agent.clone(), &quiet_config());

    let outcome = controller
        .submit_query("Top 5 productos más vendidos")
        .await;

    let SubmitOutcome::Completed { reply } = outcome else {
        panic!("expected Completed");
    };
    assert!(!reply.is_error);
    assert_eq!(reply.content, "5 filas...");
    assert_eq!(agent.queries(), vec!["Top 5 productos más vendidos"]);
}

#[tokio::test]
async fn test_whitespace_query_never_reaches_the_agent() {
    let agent = Arc::new(ScriptedAgent::new(vec![]));
    let controller = SessionController::new(agent.clone(), &quiet_config());

    let outcome = controller.submit_query("   ").await;

    assert_eq!(outcome, SubmitOutcome::RejectedEmpty);
    assert!(agent.queries().is_empty());

    let snapshot = controller.snapshot().await;
    assert!(snapshot.messages.is_empty());
    assert!(snapshot.history.is_empty());
    assert!(!snapshot.pending);
}

#[tokio::test]
async fn test_server_failure_is_absorbed_into_a_generic_reply() {
    let agent = Arc::new(ScriptedAgent::new(vec![Err(ConsultaError::status(
        500,
        "psycopg2.errors.InsufficientPrivilege: permission denied",
    ))]));
    let controller = SessionController::new(agent, &quiet_config());

    let outcome = controller.submit_query("DROP TABLE users").await;

    let SubmitOutcome::Completed { reply } = outcome else {
        panic!("expected Completed");
    };
    assert!(reply.is_error);
    assert_eq!(reply.content, FAILURE_REPLY);
    assert!(!reply.content.contains("psycopg2"));

    // Exactly one user and one assistant turn, then idle again
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.messages.len(), 2);
    assert!(!snapshot.pending);
}

#[tokio::test]
async fn test_application_error_flag_takes_the_failure_path() {
    let agent = Arc::new(ScriptedAgent::new(vec![Err(ConsultaError::application(
        "Error de configuración: faltan variables de entorno",
    ))]));
    let controller = SessionController::new(agent, &quiet_config());

    let SubmitOutcome::Completed { reply } =
        controller.submit_query("usuarios registrados").await
    else {
        panic!("expected Completed");
    };

    assert!(reply.is_error);
    assert_eq!(reply.content, FAILURE_REPLY);
}

#[tokio::test]
async fn test_back_to_back_submissions_interleave_in_order() {
    let agent = Arc::new(ScriptedAgent::new(vec![
        Ok("respuesta uno".to_string()),
        Ok("respuesta dos".to_string()),
    ]));
    let controller = SessionController::new(agent, &quiet_config());

    controller.submit_query("consulta uno").await;
    controller.submit_query("consulta dos").await;

    let snapshot = controller.snapshot().await;
    let turns: Vec<(&MessageRole, &str)> = snapshot
        .messages
        .iter()
        .map(|m| (&m.role, m.content.as_str()))
        .collect();
    assert_eq!(
        turns,
        vec![
            (&MessageRole::User, "consulta uno"),
            (&MessageRole::Assistant, "respuesta uno"),
            (&MessageRole::User, "consulta dos"),
            (&MessageRole::Assistant, "respuesta dos"),
        ]
    );

    // History is most recent first
    assert_eq!(snapshot.history[0].query, "consulta dos");
    assert_eq!(snapshot.history[1].query, "consulta uno");
}
