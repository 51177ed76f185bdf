//! Core record store and presentation model for Bookshelf.
//! This crate is the single source of truth for catalog invariants.

pub mod catalog;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod transfer;
pub mod view;

pub use catalog::Catalog;
pub use config::{CatalogConfig, ConfigError, ConfigInput};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookDraft, BookId, BookValidationError, Rating, ReadFilter};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use search::keyword::{search_books, SearchQuery};
pub use service::book_service::BookService;
pub use transfer::{ImportReport, ImportRowError, TransferError};
pub use view::table::{CatalogRow, SortColumn, SortOrder, TableView};
