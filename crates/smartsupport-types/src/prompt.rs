//! Prompt catalog types.
//!
//! The backend exposes a set of selectable system prompts. The catalog is
//! fetched once per session and is read-only afterwards.

use serde::{Deserialize, Serialize};

/// One entry of the prompt catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOption {
    pub key: String,
    pub name: String,
    pub description: String,
}

/// Full details of a single prompt, including its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptDetail {
    pub key: String,
    pub name: String,
    pub description: String,
    pub prompt: String,
}

/// Sentinel prompt key used before the catalog has loaded.
pub const DEFAULT_PROMPT_KEY: &str = "default";

/// Look up a catalog entry by key.
pub fn find_prompt<'a>(catalog: &'a [PromptOption], key: &str) -> Option<&'a PromptOption> {
    catalog.iter().find(|p| p.key == key)
}
