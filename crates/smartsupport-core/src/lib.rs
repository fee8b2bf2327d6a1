//! Session orchestration for the SmartSupport chat client.
//!
//! This crate defines the transport "port" ([`transport::ChatTransport`]) that
//! the infrastructure layer implements, the session store state machine
//! ([`session::ChatSession`]) and the presentation adapter that maps session
//! state to renderable views. It depends only on `smartsupport-types` --
//! never on `smartsupport-infra` or any HTTP crate.

pub mod presentation;
pub mod session;
pub mod transport;
