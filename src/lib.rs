//! Sevlog - leveled, structured logger factory
//!
//! Turns a level name and an encoding flag into a ready-to-use logging
//! handle. Records go to standard output as JSON or console text; the
//! runtime's own errors go to standard error.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): severities, record fields, settings, errors
//! - **Infrastructure Layer** (`infrastructure`): tracing-subscriber backed
//!   logger construction and figment settings loading
//!
//! # Example
//!
//! ```no_run
//! use sevlog::{Fields, Severity};
//!
//! let logger = sevlog::build("error", true);
//! logger.warn("dropped, below threshold");
//! logger.error_with("disk full", &Fields::new().with("mount", "/var"));
//! assert_eq!(logger.level(), Severity::Error);
//! ```

pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::models::{Fields, LoggingSettings, ResolvedLevel, Severity, FATAL_TARGET};
pub use domain::{ConfigError, LoggerError, LoggerResult};
pub use infrastructure::config::ConfigLoader;
pub use infrastructure::logging::{
    build, try_build, LogFormat, Logger, LoggerBuilder, LoggerConfig, OutputTarget,
};
