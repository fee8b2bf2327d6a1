//! CLI command definitions and dispatch for the `ssai` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod kb;
pub mod prompts;

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

use smartsupport_types::session::SessionConfig;

/// Talk to a SmartSupport backend from the terminal.
#[derive(Parser)]
#[command(name = "ssai", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend base URL (without the `/api` suffix).
    #[arg(long, global = true, env = "SMARTSUPPORT_API_URL")]
    pub api_url: Option<String>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Send a single message and print the reply.
    Ask {
        /// The message to send.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Browse the backend's system prompts.
    Prompts {
        #[command(subcommand)]
        action: prompts::PromptsCommand,
    },

    /// Manage the knowledge base (upload, add-text, load-dir, stats, clear).
    Kb {
        #[command(subcommand)]
        action: kb::KbCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Initial toggles for a new chat session.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Answer without retrieval from the knowledge base.
    #[arg(long)]
    pub no_rag: bool,

    /// Do not let the assistant call tools.
    #[arg(long)]
    pub no_tools: bool,

    /// System prompt key to start with.
    #[arg(long)]
    pub prompt: Option<String>,
}

impl SessionArgs {
    /// Layer the flags over the configured session defaults.
    pub fn apply(&self, config: &mut SessionConfig) {
        if self.no_rag {
            config.use_rag = false;
        }
        if self.no_tools {
            config.use_tools = false;
        }
        if let Some(key) = &self.prompt {
            config.prompt_key = key.clone();
        }
    }
}

/// Cyan spinner shown while waiting on the backend.
pub fn thinking_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
