//! Welcome banner shown while the conversation is empty.

use console::style;

use smartsupport_core::presentation::WelcomeView;

fn on_off(enabled: bool) -> console::StyledObject<&'static str> {
    if enabled {
        style("on").green()
    } else {
        style("off").dim()
    }
}

pub fn print_welcome_banner(api_url: &str, welcome: &WelcomeView) {
    println!();
    println!("  {} {}", "💬", style("SmartSupport").cyan().bold());
    println!("  {}", style(api_url).dim());
    println!();
    println!("  {}  {}", style("Prompt:").bold(), welcome.prompt_name);
    println!(
        "  {}     {}    {}  {}",
        style("RAG:").bold(),
        on_off(welcome.rag_enabled),
        style("Tools:").bold(),
        on_off(welcome.tools_enabled)
    );
    println!();
    println!("  {}", style("Try asking:").dim());
    for suggestion in &welcome.suggestions {
        println!("    {} {}", style("›").cyan(), suggestion);
    }
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
