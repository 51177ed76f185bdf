//! CSV import/export of the catalog.
//!
//! # Responsibility
//! - Stream CSV rows into the store's create operation.
//! - Dump the displayed table view to CSV verbatim.
//!
//! # Invariants
//! - A malformed import row is skipped and reported, never fatal.
//! - Reader/writer I/O failures abort the transfer.
//! - Identifiers are not carried across export/import.

use crate::repo::book_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod csv_export;
pub mod csv_import;

pub use csv_export::{export_file, write_export, EXPORT_HEADERS};
pub use csv_import::{import_file, import_reader, ImportReport};

/// One skipped import row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRowError {
    /// 1-based line in the source file where the record starts.
    pub line: u64,
    pub reason: String,
}

impl Display for ImportRowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl Error for ImportRowError {}

/// Fatal transfer failure.
#[derive(Debug)]
pub enum TransferError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// Storage failed part-way through an import; `imported` rows stay committed.
    Store { imported: usize, source: RepoError },
    /// Export requested with no displayed rows.
    NothingToExport,
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
            Self::Store { imported, source } => {
                write!(f, "import stopped after {imported} book(s): {source}")
            }
            Self::NothingToExport => write!(f, "No books to export."),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Store { source, .. } => Some(source),
            Self::NothingToExport => None,
        }
    }
}

impl From<std::io::Error> for TransferError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for TransferError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
