//! Presentation adapter.
//!
//! Maps session snapshots to renderable views, detects history changes that
//! should scroll the conversation to its end, and turns user intents into
//! session store calls. Layout and styling belong to the frontend.

pub mod intent;
pub mod view;
pub mod watcher;

pub use intent::SessionIntent;
pub use view::{MessageView, SessionView, ToolCallView, WelcomeView};
pub use watcher::{HistoryChange, HistoryWatcher};
