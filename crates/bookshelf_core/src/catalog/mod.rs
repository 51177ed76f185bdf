//! Record store facade with per-operation connections.
//!
//! # Responsibility
//! - Expose the store operations the presentation layer consumes.
//! - Open a connection for each operation and release it before returning.
//!
//! # Invariants
//! - No connection or record is cached between calls.
//! - Every operation emits one terminal log event with `duration_ms`.
//! - Single-process, single-user access; no locking beyond SQLite's own.

use crate::db::open_db;
use crate::model::book::{Book, BookDraft, BookId};
use crate::repo::book_repo::{RepoError, RepoResult, SqliteBookRepository};
use crate::search::keyword::SearchQuery;
use crate::service::book_service::BookService;
use log::{debug, error};
use std::path::PathBuf;
use std::time::Instant;

/// Handle to a catalog database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    db_path: PathBuf,
}

impl Catalog {
    /// Binds to `path` and creates the `books` table if it is absent.
    ///
    /// # Errors
    /// - Returns a storage error when the file cannot be opened or the
    ///   schema cannot be applied.
    pub fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let catalog = Self {
            db_path: path.into(),
        };
        catalog.run("catalog_init", |_| Ok(()))?;
        Ok(catalog)
    }

    pub fn create(&self, draft: &BookDraft) -> RepoResult<BookId> {
        self.run("book_create", |service| service.add_book(draft))
    }

    pub fn get_all(&self) -> RepoResult<Vec<Book>> {
        self.run("book_list", |service| service.all_books())
    }

    pub fn get(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.run("book_get", |service| service.get_book(id))
    }

    pub fn search(&self, query: &SearchQuery) -> RepoResult<Vec<Book>> {
        self.run("book_search", |service| service.search_books(query))
    }

    pub fn update(&self, id: BookId, draft: &BookDraft) -> RepoResult<()> {
        self.run("book_update", |service| service.update_book(id, draft))
    }

    pub fn delete(&self, id: BookId) -> RepoResult<()> {
        self.run("book_delete", |service| service.delete_book(id))
    }

    fn run<T>(
        &self,
        event: &'static str,
        f: impl FnOnce(&BookService<SqliteBookRepository<'_>>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let result = open_db(&self.db_path)
            .map_err(RepoError::from)
            .and_then(|conn| {
                let service = BookService::new(SqliteBookRepository::new(&conn));
                f(&service)
            });

        match &result {
            Ok(_) => debug!(
                "event={event} module=catalog status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event={event} module=catalog status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }

        result
    }
}
