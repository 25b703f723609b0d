//! Domain layer for the sevlog logger factory
//!
//! Severity levels, record fields, caller-facing settings and error types.
//! Nothing here depends on the logging runtime except severity mapping.

pub mod errors;
pub mod models;

pub use errors::{ConfigError, LoggerError, LoggerResult};
