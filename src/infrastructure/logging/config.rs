//! Resolved logger configuration.

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::domain::models::{ResolvedLevel, Severity};

/// Resolved logger configuration
///
/// Built once per factory call and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Stream receiving records
    pub output: OutputTarget,

    /// Stream receiving the runtime's own diagnostics
    pub error_output: OutputTarget,

    /// Record encoding
    pub format: LogFormat,

    /// Minimum severity that is emitted
    pub level: Severity,

    /// Annotate records with the calling source location
    pub include_caller: bool,
}

/// Record encoding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Tab-separated human-readable text
    Console,
}

/// Standard stream a logger writes to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
}

impl LoggerConfig {
    /// Configuration for a threshold and encoding.
    ///
    /// Caller annotation is enabled only at DEBUG.
    pub fn new(level: Severity, structured: bool) -> Self {
        Self {
            output: OutputTarget::Stdout,
            error_output: OutputTarget::Stderr,
            format: LogFormat::from_structured(structured),
            level,
            include_caller: level == Severity::Debug,
        }
    }

    /// Configuration for a resolved level name.
    pub fn from_resolved(resolved: ResolvedLevel, structured: bool) -> Self {
        Self::new(resolved.severity, structured)
    }
}

impl LogFormat {
    /// JSON when `structured`, console text otherwise.
    pub const fn from_structured(structured: bool) -> Self {
        if structured {
            Self::Json
        } else {
            Self::Console
        }
    }
}

impl OutputTarget {
    /// Writer factory for this stream.
    pub fn make_writer(self) -> BoxMakeWriter {
        match self {
            Self::Stdout => BoxMakeWriter::new(std::io::stdout),
            Self::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }
}
