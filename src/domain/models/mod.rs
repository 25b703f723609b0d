//! Domain models: severities, fields and settings.

pub mod config;
pub mod fields;
pub mod severity;

pub use config::LoggingSettings;
pub use fields::Fields;
pub use severity::{ResolvedLevel, Severity, FATAL_TARGET};
