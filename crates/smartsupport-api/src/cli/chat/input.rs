//! Async readline input for the chat loop.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use smartsupport_core::presentation::SessionView;

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a line (untrimmed).
    Line(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Returns the handler and a `SharedWriter` that must be kept alive for
    /// the lifetime of the prompt.
    pub fn new(view: &SessionView) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt_text(view))?;
        Ok((Self { rl }, writer))
    }

    /// Re-render the prompt after the session toggles changed.
    pub fn refresh(&mut self, view: &SessionView) {
        let _ = self.rl.update_prompt(&prompt_text(view));
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => InputEvent::Line(line),
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    pub fn clear_screen(&mut self) {
        let _ = self.rl.clear();
    }
}

/// `You [rag tools] >` with disabled toggles left out.
pub fn prompt_text(view: &SessionView) -> String {
    let mut flags = Vec::new();
    if view.use_rag {
        flags.push("rag");
    }
    if view.use_tools {
        flags.push("tools");
    }

    let badge = if flags.is_empty() {
        String::new()
    } else {
        format!(" {}", style(format!("[{}]", flags.join(" "))).dim())
    };
    format!("  {}{} {} ", style("You").green().bold(), badge, style(">").green().bold())
}
