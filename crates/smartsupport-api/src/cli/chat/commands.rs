//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`. Those that change the session map onto a
//! [`SessionIntent`]; the rest are handled by the loop itself.

use console::style;

use smartsupport_core::presentation::SessionIntent;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Discard the conversation and start over.
    Clear,
    /// Re-send the last user message.
    Retry,
    /// Turn retrieval on/off, or show its state when no argument is given.
    Rag(Option<bool>),
    /// Turn tool use on/off, or show its state when no argument is given.
    Tools(Option<bool>),
    /// Switch the system prompt.
    Prompt(String),
    /// List the prompt catalog.
    Prompts,
    /// Show conversation history for this session.
    History,
    /// Exit the chat session.
    Exit,
    /// Unknown command or bad arguments.
    Unknown(String),
}

impl ChatCommand {
    /// The session intent this command issues, if any.
    pub fn intent(&self) -> Option<SessionIntent> {
        match self {
            ChatCommand::Clear => Some(SessionIntent::ClearChat),
            ChatCommand::Retry => Some(SessionIntent::RetryLastMessage),
            ChatCommand::Rag(Some(on)) => Some(SessionIntent::ToggleRag(*on)),
            ChatCommand::Tools(Some(on)) => Some(SessionIntent::ToggleTools(*on)),
            ChatCommand::Prompt(key) => Some(SessionIntent::ChangePrompt(key.clone())),
            _ => None,
        }
    }
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts
        .get(1)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/new" => ChatCommand::Clear,
        "/retry" | "/r" => ChatCommand::Retry,
        "/rag" => match parse_switch(arg) {
            Ok(state) => ChatCommand::Rag(state),
            Err(()) => ChatCommand::Unknown("/rag expects on or off".to_string()),
        },
        "/tools" => match parse_switch(arg) {
            Ok(state) => ChatCommand::Tools(state),
            Err(()) => ChatCommand::Unknown("/tools expects on or off".to_string()),
        },
        "/prompt" => match arg {
            Some(key) => ChatCommand::Prompt(key.to_string()),
            None => ChatCommand::Unknown("/prompt requires a prompt key".to_string()),
        },
        "/prompts" => ChatCommand::Prompts,
        "/history" => ChatCommand::History,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

fn parse_switch(arg: Option<&str>) -> Result<Option<bool>, ()> {
    match arg.map(str::to_lowercase).as_deref() {
        None => Ok(None),
        Some("on" | "true" | "yes" | "1") => Ok(Some(true)),
        Some("off" | "false" | "no" | "0") => Ok(Some(false)),
        Some(_) => Err(()),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the conversation"),
        ("/retry", "Re-send your last message"),
        ("/rag on|off", "Toggle knowledge-base retrieval"),
        ("/tools on|off", "Toggle tool use"),
        ("/prompt <key>", "Switch the system prompt"),
        ("/prompts", "List available prompts"),
        ("/history", "Show conversation history"),
        ("/exit", "End the chat session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, desc) in rows {
        println!("  {:<16} {}", style(cmd).cyan(), desc);
    }
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
        assert_eq!(parse("what does /retry do?"), None);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/QUIT"), Some(ChatCommand::Exit));
        assert_eq!(parse("/new"), Some(ChatCommand::Clear));
        assert_eq!(parse("  /retry  "), Some(ChatCommand::Retry));
    }

    #[test]
    fn test_parse_switches() {
        assert_eq!(parse("/rag off"), Some(ChatCommand::Rag(Some(false))));
        assert_eq!(parse("/rag ON"), Some(ChatCommand::Rag(Some(true))));
        assert_eq!(parse("/tools"), Some(ChatCommand::Tools(None)));
        assert_eq!(
            parse("/tools maybe"),
            Some(ChatCommand::Unknown("/tools expects on or off".to_string()))
        );
    }

    #[test]
    fn test_parse_prompt() {
        assert_eq!(
            parse("/prompt react_agent"),
            Some(ChatCommand::Prompt("react_agent".to_string()))
        );
        assert_eq!(
            parse("/prompt   "),
            Some(ChatCommand::Unknown("/prompt requires a prompt key".to_string()))
        );
        assert_eq!(parse("/prompts"), Some(ChatCommand::Prompts));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo"), Some(ChatCommand::Unknown("/foo".to_string())));
    }

    #[test]
    fn test_commands_map_to_intents() {
        assert_eq!(ChatCommand::Clear.intent(), Some(SessionIntent::ClearChat));
        assert_eq!(ChatCommand::Retry.intent(), Some(SessionIntent::RetryLastMessage));
        assert_eq!(
            ChatCommand::Rag(Some(false)).intent(),
            Some(SessionIntent::ToggleRag(false))
        );
        assert_eq!(ChatCommand::Rag(None).intent(), None);
        assert_eq!(
            ChatCommand::Prompt("reflexion".to_string()).intent(),
            Some(SessionIntent::ChangePrompt("reflexion".to_string()))
        );
        assert_eq!(ChatCommand::History.intent(), None);
    }
}
