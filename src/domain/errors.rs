//! Domain errors for the sevlog logger factory.

use std::io;

use thiserror::Error;

/// Errors raised while constructing a logger.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// Level name outside DEBUG..FATAL (strict parsing only)
    #[error("Unknown log level: {0:?}. Must be one of: DEBUG, INFO, WARN, ERROR, FATAL")]
    UnknownLevel(String),

    /// Record sink failed its construction-time flush
    #[error("Log output is not writable: {0}")]
    Output(#[source] io::Error),
}

/// Errors raised while loading logging settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// figment could not merge or deserialize the sources
    #[error("Failed to extract logging settings: {0}")]
    Extract(#[from] Box<figment::Error>),

    /// Explicit settings file does not exist
    #[error("Config file not found: {0}")]
    MissingFile(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}

/// Result of logger construction.
pub type LoggerResult<T> = Result<T, LoggerError>;
