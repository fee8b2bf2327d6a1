//! Chat session state machine and its error observer collaborator.

pub mod observer;
pub mod store;

pub use observer::{ErrorObserver, TracingErrorObserver};
pub use store::{ChatSession, SessionSnapshot};
