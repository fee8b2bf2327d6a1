//! Main chat loop.
//!
//! Reads a line, turns it into a [`SessionIntent`] (plain text becomes a
//! send), applies it to the session and renders whatever changed. Input is
//! not read again until the intent has finished, so nothing can be typed
//! while a request is in flight.

use std::sync::Arc;

use console::style;
use tracing::debug;

use smartsupport_core::presentation::{
    HistoryChange, HistoryWatcher, MessageView, SessionIntent, SessionView,
};
use smartsupport_types::message::MessageRole;

use crate::cli::prompts::print_prompt_table;
use crate::cli::{thinking_spinner, SessionArgs};
use crate::state::{AppState, CliSession};

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Run the interactive chat loop until `/exit` or Ctrl+D.
pub async fn run_chat_loop(state: &AppState, args: &SessionArgs) -> anyhow::Result<()> {
    let session = Arc::new(state.new_session(args));

    // Fire-and-forget: the session works with the current key until it lands.
    let catalog_session = Arc::clone(&session);
    tokio::spawn(async move {
        catalog_session.load_prompt_catalog().await;
    });

    let renderer = ChatRenderer::new();
    let view = SessionView::from_snapshot(&session.snapshot());
    if let Some(welcome) = &view.welcome {
        print_welcome_banner(state.backend.base_url(), welcome);
    }

    let (mut input, _writer) =
        ChatInput::new(&view).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    // User lines are already on screen as typed; only print what the
    // backend added.
    let mut watcher = HistoryWatcher::new(|change: HistoryChange<'_>| {
        for message in change.new_messages() {
            if message.role != MessageRole::User {
                renderer.print_message(&MessageView::from(message));
            }
        }
    });

    loop {
        let line = match input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Line(line) => line,
        };

        if line.trim().is_empty() {
            continue;
        }

        let intent = match commands::parse(&line) {
            None => SessionIntent::SendMessage(line),
            Some(ChatCommand::Help) => {
                commands::print_help();
                continue;
            }
            Some(ChatCommand::Exit) => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            Some(ChatCommand::History) => {
                print_history(&session);
                continue;
            }
            Some(ChatCommand::Prompts) => {
                print_catalog(&session);
                continue;
            }
            Some(ChatCommand::Rag(None)) => {
                print_toggle("RAG", session.config().use_rag);
                continue;
            }
            Some(ChatCommand::Tools(None)) => {
                print_toggle("Tools", session.config().use_tools);
                continue;
            }
            Some(ChatCommand::Unknown(name)) => {
                println!(
                    "\n  {} Unknown command: {}. Type /help for available commands.\n",
                    style("?").yellow().bold(),
                    style(name).dim()
                );
                continue;
            }
            Some(ChatCommand::Retry)
                if !session.messages().iter().any(|m| m.role == MessageRole::User) =>
            {
                println!("\n  {}\n", style("Nothing to retry yet.").dim());
                continue;
            }
            Some(command) => match command.intent() {
                Some(intent) => intent,
                None => continue,
            },
        };

        debug!(intent = ?intent, "applying chat intent");
        let network = intent.is_network();
        let feedback = Feedback::for_intent(&intent);

        if network {
            let spinner = thinking_spinner("Thinking...");
            intent.apply(session.as_ref()).await;
            spinner.finish_and_clear();
        } else {
            intent.apply(session.as_ref()).await;
        }

        let snapshot = session.snapshot();
        let view = SessionView::from_snapshot(&snapshot);

        if let Feedback::Cleared = feedback {
            input.clear_screen();
            if let Some(welcome) = &view.welcome {
                print_welcome_banner(state.backend.base_url(), welcome);
            }
        }
        watcher.observe(&snapshot.messages);

        if network {
            if let Some(error) = &view.error {
                renderer.print_error(error);
            }
            println!();
        } else {
            feedback.print(&view);
        }

        input.refresh(&view);
    }

    Ok(())
}

/// What to tell the user after a local (non-network) intent.
enum Feedback {
    Silent,
    Cleared,
    Rag,
    Tools,
    Prompt(String),
}

impl Feedback {
    fn for_intent(intent: &SessionIntent) -> Self {
        match intent {
            SessionIntent::ClearChat => Feedback::Cleared,
            SessionIntent::ToggleRag(_) => Feedback::Rag,
            SessionIntent::ToggleTools(_) => Feedback::Tools,
            SessionIntent::ChangePrompt(key) => Feedback::Prompt(key.clone()),
            SessionIntent::SendMessage(_) | SessionIntent::RetryLastMessage => Feedback::Silent,
        }
    }

    fn print(&self, view: &SessionView) {
        match self {
            Feedback::Silent | Feedback::Cleared => {}
            Feedback::Rag => print_toggle("RAG", view.use_rag),
            Feedback::Tools => print_toggle("Tools", view.use_tools),
            Feedback::Prompt(requested) if *requested != view.prompt_key => {
                println!(
                    "\n  {} Unknown prompt '{}'. Type /prompts to list them.\n",
                    style("!").yellow().bold(),
                    requested
                );
            }
            Feedback::Prompt(key) => {
                let detail = view
                    .prompt_description
                    .as_deref()
                    .map(|d| format!(" {}", style(format!("({d})")).dim()))
                    .unwrap_or_default();
                println!(
                    "\n  {} Prompt set to {}{}\n",
                    style("✓").green().bold(),
                    style(key).cyan(),
                    detail
                );
            }
        }
    }
}

fn print_toggle(name: &str, enabled: bool) {
    let state = if enabled {
        style("on").green().bold()
    } else {
        style("off").dim()
    };
    println!("\n  {} {}\n", style(format!("{name}:")).bold(), state);
}

fn print_history(session: &CliSession) {
    let messages = session.messages();
    if messages.is_empty() {
        println!("\n  {}\n", style("No messages yet.").dim());
        return;
    }

    println!();
    for message in messages.iter().map(MessageView::from) {
        let preview: String = if message.content.chars().count() > 100 {
            let head: String = message.content.chars().take(97).collect();
            format!("{head}...")
        } else {
            message.content.clone()
        };
        let author = match message.role {
            MessageRole::User => style(message.author).green().bold(),
            _ => style(message.author).cyan().bold(),
        };
        println!(
            "  {} {} {}",
            style(&message.time).dim(),
            author,
            preview.replace('\n', " ")
        );
    }
    println!();
}

fn print_catalog(session: &CliSession) {
    let snapshot = session.snapshot();
    if !snapshot.prompts_loaded() {
        println!(
            "\n  {} Prompt catalog not loaded; using '{}'.\n",
            style("i").blue().bold(),
            snapshot.config.prompt_key
        );
        return;
    }
    print_prompt_table(
        &snapshot.config.available_prompts,
        Some(&snapshot.config.prompt_key),
    );
}
