use clap::Parser;
use eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use verdict_app::cli::{Cli, Command};
use verdict_app::config;
use verdict_app::state::AppState;
use verdict_chat::conversation::{AnalysisReport, Reply};
use verdict_core::context::format_sections;
use verdict_core::models::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if !config::has_config() {
        config::save_config(&config::starter_config())?;
        return Err(eyre::eyre!(
            "no configuration found; wrote a starter config to {}. Edit it and run again.",
            config::config_path()?.display()
        ));
    }

    let config = config::load_config()?;
    info!(config = ?config::config_info(&config), "configuration loaded");

    let state = AppState::from_config(&config).await;

    match cli.command {
        Command::Open { document_id } => {
            let (session_id, handle) = state.sessions.create().await;
            let mut session = handle.lock().await;
            println!("session {session_id}\n");

            match state.chat.open_document(&mut session, &document_id).await {
                Ok(report) => print_report(&report),
                Err(e) => {
                    error!(document_id = %document_id, error = %e, "could not open document");
                    println!("{}", e.user_message());
                    return Ok(());
                }
            }
            state.persist(&session).await;

            converse(&state, &mut session).await?;
            drop(session);
            state.sessions.discard(session_id).await;
        }
        Command::Resume { session_id } => {
            let handle = state.restore(session_id).await?;
            let mut session = handle.lock().await;
            if let Some(sections) = session.cached_sections() {
                println!("{}\n", format_sections(sections));
            }
            for turn in session.chat_history() {
                println!("使用者：{}\nAI：{}\n", turn.question, turn.answer.trim());
            }

            converse(&state, &mut session).await?;
            drop(session);
            state.sessions.discard(session_id).await;
        }
        Command::Forget { session_id } => {
            state.forget(session_id).await?;
            println!("deleted session {session_id}");
        }
    }

    Ok(())
}

/// Answer questions read from stdin, one per line, until EOF.
async fn converse(state: &AppState, session: &mut Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        match state.chat.ask(session, question).await {
            Ok(reply) => print_reply(&reply),
            Err(e) => {
                error!(error = %e, "question failed");
                println!("{}", e.user_message());
            }
        }
        state.persist(session).await;
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!("{}\n", format_sections(&report.sections));
    print_suggestions(&report.suggested_questions);
}

fn print_reply(reply: &Reply) {
    println!("{}\n", reply.answer.trim());
    print_suggestions(&reply.suggested_questions);
}

fn print_suggestions(questions: &[String]) {
    if questions.is_empty() {
        return;
    }
    println!("建議問題：");
    for q in questions {
        println!("  - {q}");
    }
    println!();
}
