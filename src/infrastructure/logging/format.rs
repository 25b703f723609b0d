//! Record encoding
//!
//! Renders `tracing` events as either one JSON object per line or
//! tab-separated console text. Both encodings carry the same fields:
//! level, time, caller (when enabled), message, then any record fields.

use std::fmt;

use chrono::Local;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::config::LogFormat;
use crate::domain::models::{Fields, Severity};

/// ISO-8601 local time with millisecond precision and numeric offset.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Severity key.
pub const LEVEL_KEY: &str = "level";
/// Timestamp key.
pub const TIME_KEY: &str = "time";
/// Source location key, DEBUG only.
pub const CALLER_KEY: &str = "caller";
/// Message key.
pub const MESSAGE_KEY: &str = "message";

/// Event field carrying an explicit caller location.
pub(crate) const CALLER_FIELD: &str = "record_caller";
/// Event field carrying JSON-encoded [`Fields`].
pub(crate) const FIELDS_FIELD: &str = "record_fields";

/// Event formatter bound to one logger's encoding.
#[derive(Debug, Clone, Copy)]
pub struct RecordFormat {
    format: LogFormat,
    include_caller: bool,
}

impl RecordFormat {
    /// Formatter for `format`, with or without caller annotation.
    pub const fn new(format: LogFormat, include_caller: bool) -> Self {
        Self {
            format,
            include_caller,
        }
    }
}

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let Some(severity) = Severity::of(metadata) else {
            return Ok(());
        };

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let caller = if self.include_caller {
            visitor.caller.take().or_else(|| {
                metadata
                    .file()
                    .map(|file| short_caller(file, metadata.line().unwrap_or(0)))
            })
        } else {
            None
        };

        let record = Record {
            severity,
            time: timestamp(),
            caller,
            message: visitor.message,
            fields: visitor.fields,
        };

        match self.format {
            LogFormat::Json => writeln!(writer, "{}", record.to_json()),
            LogFormat::Console => writeln!(writer, "{}", record.to_console()),
        }
    }
}

/// Current local time in [`TIME_FORMAT`].
pub fn timestamp() -> String {
    Local::now().format(TIME_FORMAT).to_string()
}

/// `<parent-dir>/<file>:<line>` form of a source path.
pub fn short_caller(file: &str, line: u32) -> String {
    let is_separator = |c: char| c == '/' || c == '\\';
    let short = file
        .rfind(is_separator)
        .and_then(|last| file[..last].rfind(is_separator))
        .map_or(file, |prev| &file[prev + 1..]);
    format!("{short}:{line}")
}

/// A record ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Record {
    pub severity: Severity,
    pub time: String,
    pub caller: Option<String>,
    pub message: String,
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn to_json(&self) -> String {
        let mut object = Map::new();
        object.insert(LEVEL_KEY.to_string(), Value::from(self.severity.as_str()));
        object.insert(TIME_KEY.to_string(), Value::from(self.time.as_str()));
        if let Some(caller) = &self.caller {
            object.insert(CALLER_KEY.to_string(), Value::from(caller.as_str()));
        }
        object.insert(MESSAGE_KEY.to_string(), Value::from(self.message.as_str()));
        for (key, value) in &self.fields {
            object.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Value::Object(object).to_string()
    }

    pub fn to_console(&self) -> String {
        let mut line = format!("{}\t{:<5}", self.time, self.severity);
        if let Some(caller) = &self.caller {
            line.push('\t');
            line.push_str(caller);
        }
        line.push('\t');
        line.push_str(&self.message);
        if !self.fields.is_empty() {
            line.push('\t');
            line.push_str(&Value::Object(self.fields.clone()).to_string());
        }
        line
    }
}

#[derive(Default)]
struct RecordVisitor {
    message: String,
    caller: Option<String>,
    fields: Map<String, Value>,
}

impl RecordVisitor {
    fn insert(&mut self, name: &str, value: Value) {
        match (name, value) {
            ("message", Value::String(message)) => self.message = message,
            ("message", other) => self.message = other.to_string(),
            (CALLER_FIELD, Value::String(caller)) => self.caller = Some(caller),
            (FIELDS_FIELD, Value::String(encoded)) => {
                if let Some(fields) = Fields::from_json(&encoded) {
                    for (key, value) in fields.iter() {
                        self.fields.insert(key.clone(), value.clone());
                    }
                }
            }
            (name, value) => {
                self.fields.insert(name.to_string(), value);
            }
        }
    }
}

impl Visit for RecordVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field.name(), Value::String(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field.name(), Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field.name(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field.name(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field.name(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field.name(), Value::from(value));
    }
}
