//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep presentation code decoupled from storage details.

pub mod book_service;
