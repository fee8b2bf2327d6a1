//! Infrastructure layer for the SmartSupport chat client.
//!
//! Contains the reqwest implementation of the
//! [`ChatTransport`](smartsupport_core::transport::ChatTransport) port, the
//! knowledge-base pass-through calls, and configuration loading.

pub mod config;
pub mod http;
