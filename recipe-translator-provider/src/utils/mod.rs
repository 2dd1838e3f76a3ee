//! Utility modules.

/// Keeps API keys and long model answers out of logs.
pub mod log_sanitizer;
