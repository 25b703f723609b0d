//! Record severity and level-name resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{Level, Metadata};

use crate::domain::errors::LoggerError;

/// Target marking a `tracing` ERROR event as a FATAL record.
pub const FATAL_TARGET: &str = "sevlog::fatal";

/// Severity of a log record, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Most verbose; enables caller annotation
    Debug,
    /// Routine operation
    Info,
    /// Unexpected but handled
    Warn,
    /// Operation failed
    Error,
    /// Unrecoverable failure
    Fatal,
}

/// Outcome of resolving a free-form level name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLevel {
    /// Severity to use as threshold
    pub severity: Severity,
    /// `false` when the input was not a known level name and WARN was substituted.
    pub recognized: bool,
}

impl Severity {
    /// All severities, most verbose first.
    pub const ALL: [Self; 5] = [Self::Debug, Self::Info, Self::Warn, Self::Error, Self::Fatal];

    /// Severity used when the level name is not recognized.
    pub const FALLBACK: Self = Self::Warn;

    /// Uppercase name used when rendering records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Resolve a level name case-insensitively, falling back to WARN.
    ///
    /// Input is not trimmed: `" info"` is unrecognized.
    pub fn resolve(level: &str) -> ResolvedLevel {
        match level.parse::<Self>() {
            Ok(severity) => ResolvedLevel {
                severity,
                recognized: true,
            },
            Err(_) => ResolvedLevel {
                severity: Self::FALLBACK,
                recognized: false,
            },
        }
    }

    /// Severity of a `tracing` event, or `None` for TRACE.
    pub fn of(metadata: &Metadata<'_>) -> Option<Self> {
        match *metadata.level() {
            Level::ERROR if metadata.target() == FATAL_TARGET => Some(Self::Fatal),
            Level::ERROR => Some(Self::Error),
            Level::WARN => Some(Self::Warn),
            Level::INFO => Some(Self::Info),
            Level::DEBUG => Some(Self::Debug),
            _ => None,
        }
    }

    /// Whether a record of `severity` passes a threshold of `self`.
    pub fn admits(self, severity: Self) -> bool {
        severity >= self
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            "FATAL" => Ok(Self::Fatal),
            _ => Err(LoggerError::UnknownLevel(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
