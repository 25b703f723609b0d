//! Configuration management infrastructure
//!
//! Layered logging settings using figment:
//! - YAML file loading
//! - Environment variable overrides

pub mod loader;

pub use loader::ConfigLoader;
