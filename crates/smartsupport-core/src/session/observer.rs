//! Error observer collaborator.
//!
//! The session store reports every failure to an [`ErrorObserver`] for
//! logging or telemetry. Nothing the observer returns is consumed.

use smartsupport_types::error::ClientError;

/// Receives every failure the session store encounters.
pub trait ErrorObserver: Send + Sync {
    fn on_error(&self, error: &ClientError);
}

impl<F> ErrorObserver for F
where
    F: Fn(&ClientError) + Send + Sync,
{
    fn on_error(&self, error: &ClientError) {
        self(error)
    }
}

/// Default observer: logs each failure through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorObserver;

impl ErrorObserver for TracingErrorObserver {
    fn on_error(&self, error: &ClientError) {
        tracing::error!(error = %error, "chat backend request failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn closure_observer_receives_error() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let observer = move |err: &ClientError| sink.lock().unwrap().push(err.to_string());

        observer.on_error(&ClientError::new("DB down"));
        assert_eq!(*seen.lock().unwrap(), vec!["DB down".to_string()]);
    }

    #[test]
    fn tracing_observer_does_not_panic_without_subscriber() {
        TracingErrorObserver.on_error(&ClientError::new("API error: 500"));
    }
}
