//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract consumed by services.
//! - Isolate SQLite query details from service/presentation code.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - No in-memory cache: every call round-trips to the backing store.

pub mod book_repo;
