//! Book catalog domain model.
//!
//! # Responsibility
//! - Define the canonical record shape used by store and presentation code.
//! - Own input coercion rules (rating normalization, read-filter labels).
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `BookId`.
//! - A present `Rating` always lies in `1..=10`.

pub mod book;
