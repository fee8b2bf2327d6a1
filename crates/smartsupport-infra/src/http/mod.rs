//! HTTP client for the chat backend.
//!
//! [`HttpBackend`] implements [`ChatTransport`](smartsupport_core::transport::ChatTransport)
//! against `POST /api/chat` and `GET /api/prompts`, and exposes the stateless
//! knowledge-base operations under `/api/documents`.

pub mod client;
pub mod error;
pub mod knowledge;
pub mod types;

pub use client::HttpBackend;
