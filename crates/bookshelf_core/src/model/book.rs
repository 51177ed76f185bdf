//! Book record domain model.
//!
//! # Responsibility
//! - Define the persisted `Book` record and its editable `BookDraft` fields.
//! - Normalize free-form rating input into an optional bounded `Rating`.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another record.
//! - `Rating` cannot be constructed outside `1..=10`.
//! - `read_before` is a plain boolean; its on-disk form is `0`/`1`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid digits regex"));

/// Store-assigned record identifier.
pub type BookId = i64;

/// Personal rating in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 10;

    /// Returns `None` when `value` is outside `1..=10`.
    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            u8::try_from(value).ok().map(Self)
        } else {
            None
        }
    }

    /// Form-field coercion: any integer text in range is accepted; anything
    /// else (blank, non-numeric, out of range) becomes absent.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().and_then(Self::new)
    }

    /// CSV import coercion: only a plain decimal-digit string is accepted.
    ///
    /// The raw cell is checked untrimmed; signs, decimal points and padding
    /// are rejected, so `"+7"`, `"7.0"` and `" 7"` are absent.
    pub fn parse_digits(raw: &str) -> Option<Self> {
        if !DIGITS_RE.is_match(raw) {
            return None;
        }
        raw.parse::<i64>().ok().and_then(Self::new)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("rating {value} is outside 1..=10"))
    }
}

impl From<Rating> for i64 {
    fn from(value: Rating) -> Self {
        i64::from(value.0)
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failure for user-entered record fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// A required text field is empty.
    MissingField(&'static str),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
        }
    }
}

impl Error for BookValidationError {}

/// Editable field set for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    /// Free-form shelf/location tag.
    pub location: String,
    pub read_before: bool,
    pub rating: Option<Rating>,
}

impl BookDraft {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            location: location.into(),
            read_before: false,
            rating: None,
        }
    }

    pub fn read(mut self, read_before: bool) -> Self {
        self.read_before = read_before;
        self
    }

    pub fn rated(mut self, rating: Option<Rating>) -> Self {
        self.rating = rating;
        self
    }

    /// Checks the creation-time rule: title, author and location are non-empty.
    ///
    /// Whitespace counts as content. The store accepts any text; callers
    /// creating records enforce this.
    pub fn validate_required(&self) -> Result<(), BookValidationError> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("location", &self.location),
        ] {
            if value.is_empty() {
                return Err(BookValidationError::MissingField(field));
            }
        }
        Ok(())
    }
}

/// Persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub location: String,
    pub read_before: bool,
    pub rating: Option<Rating>,
}

impl Book {
    pub fn from_draft(id: BookId, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            location: draft.location,
            read_before: draft.read_before,
            rating: draft.rating,
        }
    }

    /// Returns the editable fields, e.g. to preload an edit form.
    pub fn draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            location: self.location.clone(),
            read_before: self.read_before,
            rating: self.rating,
        }
    }
}

/// Tri-state read-status narrowing for searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadFilter {
    #[default]
    All,
    Read,
    Unread,
}

impl FromStr for ReadFilter {
    type Err = String;

    /// Accepts the filter labels `all|yes|no` as well as `read|unread`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "yes" | "read" => Ok(Self::Read),
            "no" | "unread" => Ok(Self::Unread),
            other => Err(format!(
                "unsupported read filter `{other}`; expected all|yes|no"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookDraft, BookValidationError, Rating, ReadFilter};

    #[test]
    fn rating_bounds_are_inclusive() {
        assert_eq!(Rating::new(1).map(Rating::value), Some(1));
        assert_eq!(Rating::new(10).map(Rating::value), Some(10));
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(11).is_none());
        assert!(Rating::new(-3).is_none());
    }

    #[test]
    fn lenient_parse_coerces_bad_input_to_absent() {
        assert_eq!(Rating::parse_lenient(" 9 "), Rating::new(9));
        assert_eq!(Rating::parse_lenient("-4"), None);
        assert_eq!(Rating::parse_lenient("15"), None);
        assert_eq!(Rating::parse_lenient("great"), None);
        assert_eq!(Rating::parse_lenient(""), None);
    }

    #[test]
    fn digit_parse_rejects_signs_and_decimals() {
        assert_eq!(Rating::parse_digits("7"), Rating::new(7));
        assert_eq!(Rating::parse_digits("+7"), None);
        assert_eq!(Rating::parse_digits("7.0"), None);
        assert_eq!(Rating::parse_digits("N/A"), None);
        assert_eq!(Rating::parse_digits("12"), None);
        assert_eq!(Rating::parse_digits(" 7"), None);
        assert_eq!(Rating::parse_digits("7 "), None);
    }

    #[test]
    fn validate_required_names_first_missing_field() {
        let ok = BookDraft::new("Dune", "Herbert", "Shelf A");
        assert!(ok.validate_required().is_ok());

        let missing = BookDraft::new("Dune", "", "");
        assert_eq!(
            missing.validate_required(),
            Err(BookValidationError::MissingField("author"))
        );

        let padded = BookDraft::new(" \t", "Herbert", " ");
        assert!(padded.validate_required().is_ok());
    }

    #[test]
    fn read_filter_parses_labels() {
        assert_eq!("All".parse::<ReadFilter>().unwrap(), ReadFilter::All);
        assert_eq!("YES".parse::<ReadFilter>().unwrap(), ReadFilter::Read);
        assert_eq!("no".parse::<ReadFilter>().unwrap(), ReadFilter::Unread);
        assert!("maybe".parse::<ReadFilter>().is_err());
    }

    #[test]
    fn rating_serializes_as_number_and_rejects_out_of_range_input() {
        let draft = BookDraft::new("Dune", "Herbert", "A").rated(Rating::new(9));
        let book = Book::from_draft(3, draft);
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["rating"], 9);
        assert_eq!(json["read_before"], false);

        let parsed: Book = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, book);

        assert!(serde_json::from_str::<Rating>("11").is_err());
    }
}
