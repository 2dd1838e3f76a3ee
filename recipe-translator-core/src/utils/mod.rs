//! Utility modules.

pub mod content_hash;
pub mod datetime;
