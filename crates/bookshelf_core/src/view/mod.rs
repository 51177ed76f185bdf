//! Presentation model shared by front ends.
//!
//! Holds no persistent state: every view is rebuilt from a store query.

pub mod table;
