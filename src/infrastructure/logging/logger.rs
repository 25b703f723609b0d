//! Logger factory and handle.

use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::process;

use tracing::{dispatcher, Dispatch};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

use super::config::{LogFormat, LoggerConfig, OutputTarget};
use super::format::{short_caller, RecordFormat};
use crate::domain::errors::{LoggerError, LoggerResult};
use crate::domain::models::{Fields, LoggingSettings, Severity, FATAL_TARGET};

/// Target of records emitted through [`Logger`] methods below FATAL.
pub const RECORD_TARGET: &str = "sevlog";

/// Build a logger, terminating the process if the output cannot be opened.
///
/// Unknown level names fall back to WARN with a note on standard error.
pub fn build(level: &str, structured: bool) -> Logger {
    LoggerBuilder::new(level, structured).build()
}

/// Build a logger, returning construction failures to the caller.
pub fn try_build(level: &str, structured: bool) -> LoggerResult<Logger> {
    LoggerBuilder::new(level, structured).try_build()
}

/// Logger factory with injectable output and diagnostic channels
pub struct LoggerBuilder {
    level: String,
    structured: bool,
    writer: Option<BoxMakeWriter>,
    diagnostics: Option<Box<dyn Write + Send>>,
}

impl LoggerBuilder {
    /// Builder for a level name and encoding flag.
    pub fn new(level: impl Into<String>, structured: bool) -> Self {
        Self {
            level: level.into(),
            structured,
            writer: None,
            diagnostics: None,
        }
    }

    /// Builder for loaded settings.
    pub fn from_settings(settings: &LoggingSettings) -> Self {
        Self::new(settings.level.clone(), settings.json)
    }

    /// Send records to `make_writer` instead of standard output.
    #[must_use]
    pub fn with_writer<W>(mut self, make_writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(make_writer));
        self
    }

    /// Send the unknown-level note to `diagnostics` instead of standard error.
    #[must_use]
    pub fn with_diagnostics<D>(mut self, diagnostics: D) -> Self
    where
        D: Write + Send + 'static,
    {
        self.diagnostics = Some(Box::new(diagnostics));
        self
    }

    /// Construct the logger
    ///
    /// # Errors
    /// Returns [`LoggerError::Output`] if the record sink rejects a flush.
    pub fn try_build(self) -> LoggerResult<Logger> {
        let resolved = Severity::resolve(&self.level);
        let config = LoggerConfig::from_resolved(resolved, self.structured);

        if !resolved.recognized {
            let mut diagnostics: Box<dyn Write + Send> = match self.diagnostics {
                Some(diagnostics) => diagnostics,
                None => Box::new(DiagnosticStream(config.error_output)),
            };
            if let Err(err) = writeln!(
                diagnostics,
                "Unknown value of level {:?}, setting up to {}",
                self.level,
                Severity::FALLBACK
            ) {
                tracing::warn!(error = %err, "failed to write level fallback note");
            }
        }

        let writer = self
            .writer
            .unwrap_or_else(|| config.output.make_writer());
        writer
            .make_writer()
            .flush()
            .map_err(LoggerError::Output)?;

        let threshold = config.level;
        let layer = tracing_subscriber::fmt::layer()
            .event_format(RecordFormat::new(config.format, config.include_caller))
            .with_writer(writer)
            .log_internal_errors(true)
            .with_filter(filter_fn(move |metadata| {
                Severity::of(metadata).is_some_and(|severity| threshold.admits(severity))
            }));
        let dispatch = Dispatch::new(Registry::default().with(layer));

        tracing::debug!(
            level = %config.level,
            format = ?config.format,
            include_caller = config.include_caller,
            "logger constructed"
        );

        Ok(Logger { config, dispatch })
    }

    /// Construct the logger or exit with status 1.
    pub fn build(self) -> Logger {
        match self.try_build() {
            Ok(logger) => logger,
            Err(err) => {
                eprintln!("error initializing logger: {err}");
                process::exit(1);
            }
        }
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("level", &self.level)
            .field("structured", &self.structured)
            .field("custom_writer", &self.writer.is_some())
            .field("custom_diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

/// Lazily locked standard stream used for the fallback note.
struct DiagnosticStream(OutputTarget);

impl Write for DiagnosticStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0 {
            OutputTarget::Stdout => io::stdout().write(buf),
            OutputTarget::Stderr => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0 {
            OutputTarget::Stdout => io::stdout().flush(),
            OutputTarget::Stderr => io::stderr().flush(),
        }
    }
}

/// Leveled, structured logging handle
///
/// Cloning is cheap and clones share the same output. Separate factory calls
/// never share state.
#[derive(Clone)]
pub struct Logger {
    config: LoggerConfig,
    dispatch: Dispatch,
}

impl Logger {
    /// Configuration this handle was built with.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Minimum emitted severity.
    pub fn level(&self) -> Severity {
        self.config.level
    }

    /// Record encoding.
    pub fn format(&self) -> LogFormat {
        self.config.format
    }

    /// Whether a record at `severity` would be emitted.
    pub fn enabled(&self, severity: Severity) -> bool {
        self.config.level.admits(severity)
    }

    /// Underlying `tracing` dispatcher.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this logger as the current `tracing` dispatcher.
    ///
    /// Plain `tracing` macros inside `f` are filtered and rendered by this
    /// logger. Use `target: FATAL_TARGET` on an ERROR event for a FATAL record.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// Emit a DEBUG record.
    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, message, &Fields::new());
    }

    /// Emit an INFO record.
    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log(Severity::Info, message, &Fields::new());
    }

    /// Emit a WARN record.
    #[track_caller]
    pub fn warn(&self, message: &str) {
        self.log(Severity::Warn, message, &Fields::new());
    }

    /// Emit an ERROR record.
    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log(Severity::Error, message, &Fields::new());
    }

    /// Emit a FATAL record. The process keeps running.
    #[track_caller]
    pub fn fatal(&self, message: &str) {
        self.log(Severity::Fatal, message, &Fields::new());
    }

    /// Emit a DEBUG record with fields.
    #[track_caller]
    pub fn debug_with(&self, message: &str, fields: &Fields) {
        self.log(Severity::Debug, message, fields);
    }

    /// Emit an INFO record with fields.
    #[track_caller]
    pub fn info_with(&self, message: &str, fields: &Fields) {
        self.log(Severity::Info, message, fields);
    }

    /// Emit a WARN record with fields.
    #[track_caller]
    pub fn warn_with(&self, message: &str, fields: &Fields) {
        self.log(Severity::Warn, message, fields);
    }

    /// Emit an ERROR record with fields.
    #[track_caller]
    pub fn error_with(&self, message: &str, fields: &Fields) {
        self.log(Severity::Error, message, fields);
    }

    /// Emit a FATAL record with fields. The process keeps running.
    #[track_caller]
    pub fn fatal_with(&self, message: &str, fields: &Fields) {
        self.log(Severity::Fatal, message, fields);
    }

    /// Emit a record at `severity`; dropped when below the threshold.
    #[track_caller]
    pub fn log(&self, severity: Severity, message: &str, fields: &Fields) {
        if !self.enabled(severity) {
            return;
        }

        let location = Location::caller();
        let caller = self
            .config
            .include_caller
            .then(|| short_caller(location.file(), location.line()));
        let encoded = (!fields.is_empty()).then(|| fields.to_json());

        self.in_scope(|| emit(severity, message, caller.as_deref(), encoded.as_deref()));
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn emit(severity: Severity, message: &str, caller: Option<&str>, fields: Option<&str>) {
    match severity {
        Severity::Debug => tracing::debug!(
            target: RECORD_TARGET,
            record_caller = caller,
            record_fields = fields,
            "{message}"
        ),
        Severity::Info => tracing::info!(
            target: RECORD_TARGET,
            record_caller = caller,
            record_fields = fields,
            "{message}"
        ),
        Severity::Warn => tracing::warn!(
            target: RECORD_TARGET,
            record_caller = caller,
            record_fields = fields,
            "{message}"
        ),
        Severity::Error => tracing::error!(
            target: RECORD_TARGET,
            record_caller = caller,
            record_fields = fields,
            "{message}"
        ),
        Severity::Fatal => tracing::error!(
            target: FATAL_TARGET,
            record_caller = caller,
            record_fields = fields,
            "{message}"
        ),
    }
}
