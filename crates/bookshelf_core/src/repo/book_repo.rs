//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/delete/search over the `books` table.
//! - Keep SQL details and the on-disk encoding inside the store boundary.
//!
//! # Invariants
//! - `readBefore` is written as `0`/`1`; any other persisted value is
//!   rejected on read.
//! - Update/delete of an unknown id reports `NotFound` instead of succeeding.

use crate::db::DbError;
use crate::model::book::{Book, BookDraft, BookId, Rating};
use crate::search::keyword::{self, SearchQuery};
use log::warn;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    location,
    readBefore,
    rating
FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Backing store unreachable or statement failure.
    Db(DbError),
    NotFound(BookId),
    InvalidData(String),
}

impl RepoError {
    /// Whether this error came from the backing store rather than from the
    /// addressed record.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Db(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "storage error: {err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record-store interface for book CRUD and search.
pub trait BookRepository {
    fn create_book(&self, draft: &BookDraft) -> RepoResult<BookId>;
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    fn search_books(&self, query: &SearchQuery) -> RepoResult<Vec<Book>>;
    fn update_book(&self, id: BookId, draft: &BookDraft) -> RepoResult<()>;
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&self, draft: &BookDraft) -> RepoResult<BookId> {
        self.conn.execute(
            "INSERT INTO books (
                title,
                author,
                location,
                readBefore,
                rating
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.title.as_str(),
                draft.author.as_str(),
                draft.location.as_str(),
                bool_to_int(draft.read_before),
                draft.rating.map(i64::from),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn search_books(&self, query: &SearchQuery) -> RepoResult<Vec<Book>> {
        keyword::search_books(self.conn, query)
    }

    fn update_book(&self, id: BookId, draft: &BookDraft) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = ?1,
                author = ?2,
                location = ?3,
                readBefore = ?4,
                rating = ?5
             WHERE id = ?6;",
            params![
                draft.title.as_str(),
                draft.author.as_str(),
                draft.location.as_str(),
                bool_to_int(draft.read_before),
                draft.rating.map(i64::from),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

pub(crate) fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id: BookId = row.get("id")?;

    let read_before = match row.get::<_, Option<i64>>("readBefore")? {
        Some(0) => false,
        Some(1) => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid readBefore value `{other:?}` in books.readBefore (id={id})"
            )));
        }
    };

    // Catalogs filled by older imports may hold unbounded ratings.
    let rating = match row.get::<_, Option<i64>>("rating")? {
        Some(value) => {
            let rating = Rating::new(value);
            if rating.is_none() {
                warn!(
                    "event=book_decode module=repo status=coerced id={id} field=rating value={value}"
                );
            }
            rating
        }
        None => None,
    };

    Ok(Book {
        id,
        title: required_text(row, "title", id)?,
        author: required_text(row, "author", id)?,
        location: required_text(row, "location", id)?,
        read_before,
        rating,
    })
}

fn required_text(row: &Row<'_>, column: &'static str, id: BookId) -> RepoResult<String> {
    row.get::<_, Option<String>>(column)?.ok_or_else(|| {
        RepoError::InvalidData(format!("missing {column} in books.{column} (id={id})"))
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
