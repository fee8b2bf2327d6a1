//! Knowledge-base commands: upload, add-text, load-dir, stats, clear.
//!
//! These call the backend directly; they have no effect on chat sessions.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use serde_json::{Map, Value};

use smartsupport_types::knowledge::IngestResult;

use crate::cli::thinking_spinner;
use crate::state::AppState;

#[derive(Subcommand)]
pub enum KbCommand {
    /// Upload a document (PDF, TXT, DOCX, MD).
    Upload {
        /// Local file to upload.
        file: PathBuf,
    },

    /// Add raw text snippets.
    #[command(name = "add-text")]
    AddText {
        /// One or more text snippets.
        #[arg(required = true, num_args = 1..)]
        texts: Vec<String>,

        /// JSON object applied to every snippet, or a JSON array with one
        /// object per snippet.
        #[arg(long)]
        metadata: Option<String>,
    },

    /// Ingest a directory that lives on the backend host.
    #[command(name = "load-dir")]
    LoadDir {
        /// Directory path as seen by the backend.
        path: String,
    },

    /// Show knowledge-base statistics.
    Stats,

    /// Delete every document from the knowledge base.
    Clear {
        /// Skip confirmation prompt.
        #[arg(long, short)]
        force: bool,
    },
}

pub async fn handle_kb_command(action: KbCommand, state: &AppState, json: bool) -> Result<()> {
    match action {
        KbCommand::Upload { file } => {
            let spinner = (!json).then(|| thinking_spinner("Uploading..."));
            let result = state.backend.upload_document(&file).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            print_ingest(&result?, json)
        }
        KbCommand::AddText { texts, metadata } => {
            let metadatas = metadata
                .as_deref()
                .map(|raw| parse_metadata(raw, texts.len()))
                .transpose()?;
            let result = state
                .backend
                .add_text(&texts, metadatas.as_deref())
                .await?;
            print_ingest(&result, json)
        }
        KbCommand::LoadDir { path } => {
            let spinner = (!json).then(|| thinking_spinner("Loading directory..."));
            let result = state.backend.load_directory(&path).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            print_ingest(&result?, json)
        }
        KbCommand::Stats => {
            let stats = state.backend.knowledge_base_stats().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!();
                println!(
                    "  {}  {}",
                    style("Collection:").bold(),
                    style(&stats.collection_name).cyan()
                );
                println!(
                    "  {}   {}",
                    style("Documents:").bold(),
                    stats.total_documents
                );
                println!();
            }
            Ok(())
        }
        KbCommand::Clear { force } => {
            if !force {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Delete {} documents from the knowledge base?",
                        style("all").red().bold()
                    ))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("  Cancelled.");
                    return Ok(());
                }
            }

            let message = state.backend.clear_knowledge_base().await?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({"cleared": true, "message": message})
                );
            } else {
                println!(
                    "  {} {}",
                    style("✓").green().bold(),
                    message.as_deref().unwrap_or("Knowledge base cleared.")
                );
            }
            Ok(())
        }
    }
}

fn print_ingest(result: &IngestResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!(
            "  {} {} {}",
            style("✓").green().bold(),
            result.message,
            style(format!("({} chunks)", result.chunks_added)).dim()
        );
    }
    Ok(())
}

/// Expand `--metadata` into one object per text.
///
/// A single object is repeated for every text; an array must match the
/// number of texts.
fn parse_metadata(raw: &str, count: usize) -> Result<Vec<Map<String, Value>>> {
    let value: Value = serde_json::from_str(raw).context("--metadata is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(vec![map; count]),
        Value::Array(items) => {
            if items.len() != count {
                bail!(
                    "--metadata has {} entries but {} texts were given",
                    items.len(),
                    count
                );
            }
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Ok(map),
                    other => bail!("--metadata entries must be objects, got {other}"),
                })
                .collect()
        }
        other => bail!("--metadata must be an object or array of objects, got {other}"),
    }
}
