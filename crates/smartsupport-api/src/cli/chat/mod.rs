//! Interactive chat session in the terminal.
//!
//! Entry point: [`loop_runner::run_chat_loop`]. The loop only translates
//! input into session intents and renders snapshots; all conversation state
//! lives in the core `ChatSession`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
