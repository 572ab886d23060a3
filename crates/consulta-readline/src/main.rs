use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use consulta_core::config::ConsultaConfig;
use consulta_core::session::{Message, MessageRole, SessionSnapshot};
use consulta_interaction::{SessionController, SqlAgentClient, SubmitOutcome};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/historial".to_string(),
                "/limpiar".to_string(),
                "/salir".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn print_message(message: &Message) {
    match message.role {
        MessageRole::User => {
            println!("{}", format!("Tú> {}", message.content).green());
        }
        MessageRole::Assistant if message.is_error => {
            for line in message.content.lines() {
                println!("{}", line.red());
            }
        }
        MessageRole::Assistant => {
            println!("{}", "[Agente]".bright_magenta());
            for line in message.content.lines() {
                println!("{}", line.bright_blue());
            }
        }
        MessageRole::System => {
            println!("{}", message.content.bright_black());
        }
    }
    println!();
}

fn print_history(snapshot: &SessionSnapshot) {
    if snapshot.history.is_empty() {
        println!("{}", "No hay consultas recientes.".bright_black());
        println!();
        return;
    }

    println!("{}", "Historial (más reciente primero):".bright_magenta());
    for (index, entry) in snapshot.history.iter().enumerate() {
        println!("{}", format!("  {}. {}", index + 1, entry.query).bright_blue());
    }
    println!(
        "{}",
        "Usa '/historial N' para repetir una consulta.".bright_black()
    );
    println!();
}

/// The main entry point for the Consulta REPL.
///
/// Wires the HTTP agent client and the session controller, then runs a
/// rustyline loop: plain input is submitted as a query, slash commands
/// inspect the history, clear the session, or exit.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ConsultaConfig::load()?;

    let agent = Arc::new(SqlAgentClient::new(config.endpoint.clone()));
    let controller = SessionController::new(agent, &config);

    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Consulta ===".bright_magenta().bold());
    println!(
        "{}",
        "Escribe una pregunta para tu base de datos, '/historial' para repetir una consulta o '/salir' para terminar."
            .bright_black()
    );
    println!();

    // Render the seeded welcome turn
    for message in &controller.snapshot().await.messages {
        print_message(message);
    }

    loop {
        let readline = rl.readline("consulta> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "/salir" {
                    println!("{}", "¡Hasta luego!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed == "/limpiar" {
                    controller.clear_session().await;
                    println!("{}", "Conversación reiniciada.".bright_black());
                    println!();
                    for message in &controller.snapshot().await.messages {
                        print_message(message);
                    }
                    continue;
                }

                if let Some(rest) = trimmed.strip_prefix("/historial") {
                    let snapshot = controller.snapshot().await;
                    let rest = rest.trim();

                    if rest.is_empty() {
                        print_history(&snapshot);
                        continue;
                    }

                    let selected = rest
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|index| snapshot.history.get(index));

                    match selected {
                        Some(entry) => {
                            println!("{}", format!("Tú> {}", entry.query).green());
                            println!("{}", "pensando…".bright_black());
                            if let Some(SubmitOutcome::Completed { reply }) =
                                controller.select_history_entry(&entry.id).await
                            {
                                print_message(&reply);
                            }
                        }
                        None => {
                            println!(
                                "{}",
                                format!("No hay ninguna entrada '{rest}' en el historial.")
                                    .yellow()
                            );
                            println!();
                        }
                    }
                    continue;
                }

                println!("{}", "pensando…".bright_black());
                match controller.submit_query(trimmed).await {
                    SubmitOutcome::Completed { reply } => print_message(&reply),
                    SubmitOutcome::RejectedEmpty => {
                        println!("{}", "Escribe una consulta para enviarla.".yellow());
                        println!();
                    }
                    SubmitOutcome::RejectedBusy => {
                        println!(
                            "{}",
                            "Hay una consulta en curso; espera a que termine.".yellow()
                        );
                        println!();
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!(
                    "{}",
                    "CTRL-C detectado. Escribe '/salir' para terminar.".yellow()
                );
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "¡Hasta luego!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
