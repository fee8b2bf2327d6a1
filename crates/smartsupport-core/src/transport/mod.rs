//! Backend transport abstraction.
//!
//! The session store talks to the chat backend exclusively through the
//! [`ChatTransport`] trait. The HTTP implementation lives in
//! `smartsupport-infra`.

pub mod backend;

pub use backend::ChatTransport;
