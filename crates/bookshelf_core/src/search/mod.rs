//! Keyword search entry points.
//!
//! # Responsibility
//! - Expose substring search over title/author/location.
//! - Keep read-status narrowing inside core.

pub mod keyword;
