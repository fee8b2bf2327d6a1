//! Prompt catalog commands: list, show.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use smartsupport_core::transport::ChatTransport;
use smartsupport_types::prompt::PromptOption;

use crate::state::AppState;

use super::chat::renderer::ChatRenderer;

#[derive(Subcommand)]
pub enum PromptsCommand {
    /// List the available system prompts.
    #[command(alias = "ls")]
    List,

    /// Show the full text of one prompt.
    Show {
        /// Prompt key (see `ssai prompts list`).
        key: String,
    },
}

pub async fn handle_prompts_command(
    action: PromptsCommand,
    state: &AppState,
    json: bool,
) -> Result<()> {
    match action {
        PromptsCommand::List => list_prompts(state, json).await,
        PromptsCommand::Show { key } => show_prompt(state, &key, json).await,
    }
}

async fn list_prompts(state: &AppState, json: bool) -> Result<()> {
    let prompts = state.backend.fetch_prompts().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&prompts)?);
        return Ok(());
    }

    let active = state.config.prompt_key.as_str();
    print_prompt_table(&prompts, Some(active));
    Ok(())
}

async fn show_prompt(state: &AppState, key: &str, json: bool) -> Result<()> {
    let detail = state.backend.fetch_prompt_detail(key).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style(&detail.name).cyan().bold(),
        style(format!("({})", detail.key)).dim()
    );
    println!("  {}", style(&detail.description).dim());
    println!();
    let rendered = ChatRenderer::new().render_markdown(&detail.prompt);
    for line in rendered.lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}

/// Print the catalog as a table, marking `active` when it is present.
pub fn print_prompt_table(prompts: &[PromptOption], active: Option<&str>) {
    if prompts.is_empty() {
        println!();
        println!("  {} The backend offers no prompts.", style("i").blue().bold());
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("").fg(Color::White),
        Cell::new("Key").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Description").fg(Color::White),
    ]);

    for prompt in prompts {
        let is_active = active == Some(prompt.key.as_str());
        table.add_row(vec![
            Cell::new(if is_active { "*" } else { "" }).fg(Color::Green),
            Cell::new(&prompt.key).fg(Color::Cyan),
            Cell::new(&prompt.name),
            Cell::new(&prompt.description).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} prompt{}",
        style(prompts.len()).bold(),
        if prompts.len() == 1 { "" } else { "s" }
    );
    println!();
}
