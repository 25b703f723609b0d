//! Logging infrastructure
//!
//! Leveled, structured logger construction on top of tracing-subscriber:
//! - Level-name resolution with WARN fallback
//! - JSON or console record encoding
//! - Caller annotation at DEBUG
//! - Per-handle dispatchers, no global subscriber

pub mod config;
pub mod format;
pub mod logger;

pub use config::{LogFormat, LoggerConfig, OutputTarget};
pub use format::{RecordFormat, TIME_FORMAT};
pub use logger::{build, try_build, Logger, LoggerBuilder, RECORD_TARGET};

// Re-export tracing macros for use inside `Logger::in_scope`
pub use tracing::{debug, error, info, warn};
