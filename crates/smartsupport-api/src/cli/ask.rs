//! One-shot `ssai ask`: send a single message through a fresh session.

use anyhow::{bail, Result};

use smartsupport_core::presentation::MessageView;
use smartsupport_types::message::MessageRole;

use crate::cli::{thinking_spinner, SessionArgs};
use crate::state::AppState;

use super::chat::renderer::ChatRenderer;

pub async fn ask(state: &AppState, text: &str, args: &SessionArgs, json: bool) -> Result<()> {
    let session = state.new_session(args);

    let spinner = (!json).then(|| thinking_spinner("Thinking..."));
    session.send_message(text).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let snapshot = session.snapshot();
    if let Some(error) = snapshot.error {
        bail!(error);
    }

    let Some(reply) = snapshot
        .messages
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::Assistant)
    else {
        bail!("Nothing to send: message is empty");
    };

    let view = MessageView::from(reply);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        ChatRenderer::new().print_message(&view);
        println!();
    }

    Ok(())
}
