//! Book use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD/search entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::book::{Book, BookDraft, BookId};
use crate::repo::book_repo::{BookRepository, RepoResult};
use crate::search::keyword::SearchQuery;

/// Use-case service wrapper for book operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts a new record and returns its assigned id.
    pub fn add_book(&self, draft: &BookDraft) -> RepoResult<BookId> {
        self.repo.create_book(draft)
    }

    pub fn all_books(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_books()
    }

    pub fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.repo.get_book(id)
    }

    pub fn search_books(&self, query: &SearchQuery) -> RepoResult<Vec<Book>> {
        self.repo.search_books(query)
    }

    /// Overwrites every field of an existing record.
    ///
    /// Returns `RepoError::NotFound` when no record has `id`.
    pub fn update_book(&self, id: BookId, draft: &BookDraft) -> RepoResult<()> {
        self.repo.update_book(id, draft)
    }

    /// Returns `RepoError::NotFound` when no record has `id`.
    pub fn delete_book(&self, id: BookId) -> RepoResult<()> {
        self.repo.delete_book(id)
    }
}
