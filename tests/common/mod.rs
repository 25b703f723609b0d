//! Common test utilities for integration tests
//!
//! Provides an in-memory sink that can stand in for standard output or the
//! diagnostic channel, so tests can inspect what a logger wrote.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use sevlog::LoggerBuilder;
use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

/// Cloneable in-memory byte sink
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("log output is UTF-8")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Parse every line as a JSON object.
    #[allow(dead_code)]
    pub fn records(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .map(|line| serde_json::from_str(line).expect("record is valid JSON"))
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Build a logger whose records and diagnostics are captured
///
/// Returns the logger, its record buffer and its diagnostic buffer.
#[allow(dead_code)]
pub fn captured(level: &str, structured: bool) -> (sevlog::Logger, SharedBuffer, SharedBuffer) {
    let records = SharedBuffer::default();
    let diagnostics = SharedBuffer::default();
    let logger = LoggerBuilder::new(level, structured)
        .with_writer(records.clone())
        .with_diagnostics(diagnostics.clone())
        .try_build()
        .expect("logger builds");
    (logger, records, diagnostics)
}
