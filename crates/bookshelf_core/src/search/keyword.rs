//! Substring keyword search over the `books` table.
//!
//! # Responsibility
//! - Match a keyword against title, author and location.
//! - Narrow the match set by read status.
//!
//! # Invariants
//! - An empty keyword matches every record.
//! - The read filter applies to the whole keyword disjunction.
//! - `%`, `_` and `\` in the keyword match literally.
//! - Case folding follows SQLite `LIKE` (ASCII only).

use crate::model::book::{Book, ReadFilter};
use crate::repo::book_repo::{parse_book_row, RepoResult, BOOK_SELECT_SQL};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// Search options: keyword plus tri-state read narrowing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Raw keyword text; not trimmed.
    pub keyword: String,
    pub read_filter: ReadFilter,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            read_filter: ReadFilter::All,
        }
    }

    pub fn with_filter(mut self, read_filter: ReadFilter) -> Self {
        self.read_filter = read_filter;
        self
    }
}

/// Returns books matching `query`, ordered by id.
pub fn search_books(conn: &Connection, query: &SearchQuery) -> RepoResult<Vec<Book>> {
    let pattern = like_pattern(&query.keyword);
    let mut sql = format!(
        "{BOOK_SELECT_SQL}
         WHERE (title LIKE ?1 ESCAPE '\\'
            OR author LIKE ?1 ESCAPE '\\'
            OR location LIKE ?1 ESCAPE '\\')"
    );
    let mut bind_values: Vec<Value> = vec![Value::Text(pattern)];

    match query.read_filter {
        ReadFilter::All => {}
        ReadFilter::Read => {
            sql.push_str(" AND readBefore = ?2");
            bind_values.push(Value::Integer(1));
        }
        ReadFilter::Unread => {
            sql.push_str(" AND readBefore = ?2");
            bind_values.push(Value::Integer(0));
        }
    }

    sql.push_str(" ORDER BY id ASC;");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut books = Vec::new();

    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }

    Ok(books)
}

fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
