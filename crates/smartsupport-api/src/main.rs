//! SmartSupport command-line client.
//!
//! Binary name: `ssai`
//!
//! Parses CLI arguments, loads configuration, then dispatches to the
//! appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use smartsupport_observe::tracing_setup::{default_directive, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(default_directive(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need a backend
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "ssai", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.api_url.clone()).await?;

    match cli.command {
        Commands::Chat { session } => {
            cli::chat::loop_runner::run_chat_loop(&state, &session).await?;
        }

        Commands::Ask { text, session } => {
            cli::ask::ask(&state, &text.join(" "), &session, cli.json).await?;
        }

        Commands::Prompts { action } => {
            cli::prompts::handle_prompts_command(action, &state, cli.json).await?;
        }

        Commands::Kb { action } => {
            cli::kb::handle_kb_command(action, &state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
