//! Terminal rendering of conversation messages.
//!
//! Assistant replies are markdown and go through `termimad`; tool calls are
//! shown as one status line each under the reply.

use console::style;
use termimad::MadSkin;

use smartsupport_core::presentation::{MessageView, ToolCallView};
use smartsupport_types::message::{MessageRole, ToolOutcome};

pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(termimad::crossterm::style::Color::Cyan);
        skin.headers[0].set_fg(termimad::crossterm::style::Color::Cyan);
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        Self { skin }
    }

    pub fn render_markdown(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Print one message with its author line, body and tool calls.
    pub fn print_message(&self, message: &MessageView) {
        let author = match message.role {
            MessageRole::User => style(message.author).green().bold(),
            MessageRole::Assistant => style(message.author).cyan().bold(),
            MessageRole::System => style(message.author).magenta().bold(),
        };
        println!();
        println!("  {}  {}", author, style(&message.time).dim());

        match message.role {
            MessageRole::Assistant => {
                for line in self.render_markdown(&message.content).lines() {
                    println!("  {line}");
                }
            }
            _ => {
                for line in message.content.lines() {
                    println!("  {line}");
                }
            }
        }

        if !message.tool_calls.is_empty() {
            println!();
            for call in &message.tool_calls {
                println!("{}", format_tool_call(call));
            }
        }
    }

    /// Print a failure inline, with the recovery hint.
    pub fn print_error(&self, error: &str) {
        println!();
        println!("  {} {}", style("!").red().bold(), style(error).red());
        println!(
            "  {}",
            style("Type /retry to send your last message again.").dim()
        );
    }
}

/// `  ⚙ create_ticket ✓ Ticket #42 created`
pub fn format_tool_call(call: &ToolCallView) -> String {
    let marker = match call.outcome {
        ToolOutcome::Succeeded => style("✓").green().bold(),
        ToolOutcome::Failed => style("✗").red().bold(),
        ToolOutcome::Unknown => style("?").yellow().bold(),
    };

    let mut line = format!(
        "  {} {} {}",
        style("⚙").dim(),
        style(&call.tool).bold(),
        marker
    );
    if let Some(message) = &call.message {
        line.push(' ');
        line.push_str(message);
    }
    line
}
