//! Add/edit form handling: raw field text in, `BookDraft` out.
//!
//! # Invariants
//! - Rating text is coerced, never rejected: bad input becomes absent.
//! - Required-field checks apply to the add form only.

use bookshelf_core::{Book, BookDraft, BookValidationError, Rating};

/// Field values typed into the add form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub location: Option<String>,
    pub read_before: bool,
    pub rating: Option<String>,
}

impl AddForm {
    pub fn into_draft(self) -> Result<BookDraft, BookValidationError> {
        let draft = BookDraft::new(
            self.title.unwrap_or_default(),
            self.author.unwrap_or_default(),
            self.location.unwrap_or_default(),
        )
        .read(self.read_before)
        .rated(self.rating.as_deref().and_then(Rating::parse_lenient));
        draft.validate_required()?;
        Ok(draft)
    }
}

/// Changes applied on top of a preloaded record; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub location: Option<String>,
    pub read_before: Option<bool>,
    /// Replacement rating text; blank or invalid clears the rating.
    pub rating: Option<String>,
}

impl EditForm {
    pub fn apply(self, book: &Book) -> BookDraft {
        let mut draft = book.draft();
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(author) = self.author {
            draft.author = author;
        }
        if let Some(location) = self.location {
            draft.location = location;
        }
        if let Some(read_before) = self.read_before {
            draft.read_before = read_before;
        }
        if let Some(rating) = self.rating {
            draft.rating = Rating::parse_lenient(&rating);
        }
        draft
    }
}
