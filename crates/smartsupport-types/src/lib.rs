//! Shared domain types for the SmartSupport chat client.
//!
//! This crate contains the data model shared by the session store, the HTTP
//! transport and the CLI: messages, tool calls, the prompt catalog, session
//! configuration, knowledge-base results and the single client error type.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod knowledge;
pub mod message;
pub mod prompt;
pub mod session;
