//! Tabular catalog view: display rows, header-click sorting, query wiring.
//!
//! # Responsibility
//! - Render `Book` records into the display strings shown in the table.
//! - Sort displayed rows by any visible column.
//!
//! # Invariants
//! - `ID` and `Rating` sort numerically; `N/A` ranks as 0.
//! - Every other column sorts lexicographically.
//! - Sorting is stable, so equal keys keep query order.

use crate::catalog::Catalog;
use crate::model::book::Book;
use crate::repo::book_repo::RepoResult;
use crate::search::keyword::SearchQuery;
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

/// Display text for an absent rating.
pub const RATING_ABSENT: &str = "N/A";
pub const READ_YES: &str = "Yes";
pub const READ_NO: &str = "No";

/// One displayed table row; field names double as CSV export headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRow {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "ReadBefore")]
    pub read_before: String,
    #[serde(rename = "Rating")]
    pub rating: String,
}

impl From<&Book> for CatalogRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            location: book.location.clone(),
            read_before: if book.read_before { READ_YES } else { READ_NO }.to_string(),
            rating: book
                .rating
                .map_or_else(|| RATING_ABSENT.to_string(), |rating| rating.to_string()),
        }
    }
}

impl CatalogRow {
    fn numeric_rating(&self) -> i64 {
        self.rating.parse().unwrap_or(0)
    }
}

/// Visible table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Title,
    Author,
    Location,
    ReadBefore,
    Rating,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        Self::Id,
        Self::Title,
        Self::Author,
        Self::Location,
        Self::ReadBefore,
        Self::Rating,
    ];

    /// Column header text.
    pub fn header(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Location => "Location",
            Self::ReadBefore => "ReadBefore",
            Self::Rating => "Rating",
        }
    }

    fn compare(self, left: &CatalogRow, right: &CatalogRow) -> Ordering {
        match self {
            Self::Id => left.id.cmp(&right.id),
            Self::Rating => left.numeric_rating().cmp(&right.numeric_rating()),
            Self::Title => left.title.cmp(&right.title),
            Self::Author => left.author.cmp(&right.author),
            Self::Location => left.location.cmp(&right.location),
            Self::ReadBefore => left.read_before.cmp(&right.read_before),
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase().replace(['_', '-'], "");
        if wanted == "read" {
            return Ok(Self::ReadBefore);
        }
        Self::ALL
            .into_iter()
            .find(|column| column.header().to_ascii_lowercase() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown column `{value}`; expected one of id|title|author|location|readbefore|rating"
                )
            })
    }
}

/// Active sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: SortColumn,
    pub descending: bool,
}

impl SortOrder {
    pub fn ascending(column: SortColumn) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    /// Header-click transition: same column flips direction, another column
    /// starts ascending.
    pub fn toggle(current: Option<Self>, column: SortColumn) -> Self {
        match current {
            Some(order) if order.column == column => Self {
                column,
                descending: !order.descending,
            },
            _ => Self::ascending(column),
        }
    }

    /// Folds a sequence of header clicks into the resulting order.
    pub fn from_clicks(clicks: impl IntoIterator<Item = SortColumn>) -> Option<Self> {
        clicks
            .into_iter()
            .fold(None, |current, column| Some(Self::toggle(current, column)))
    }
}

/// Sorts rows in place by `order`.
pub fn sort_rows(rows: &mut [CatalogRow], order: SortOrder) {
    rows.sort_by(|left, right| {
        let ordering = order.column.compare(left, right);
        if order.descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// The currently displayed, filtered and sorted table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub rows: Vec<CatalogRow>,
}

impl TableView {
    /// Re-runs `query` against the store and applies `order`.
    pub fn query(
        catalog: &Catalog,
        query: &SearchQuery,
        order: Option<SortOrder>,
    ) -> RepoResult<Self> {
        let books = catalog.search(query)?;
        Ok(Self::from_books(&books, order))
    }

    pub fn from_books(books: &[Book], order: Option<SortOrder>) -> Self {
        let mut rows = books.iter().map(CatalogRow::from).collect::<Vec<_>>();
        if let Some(order) = order {
            sort_rows(&mut rows, order);
        }
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
