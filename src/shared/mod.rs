//! Cross-cutting infrastructure: configuration, the shared HTTP client and display formatting.

pub mod config;
pub mod format;
pub mod http;
