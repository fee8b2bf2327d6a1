//! Observability setup shared by SmartSupport binaries.

pub mod tracing_setup;
