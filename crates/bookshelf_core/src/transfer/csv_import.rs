//! CSV import into the record store.
//!
//! # Responsibility
//! - Map header columns case-insensitively onto book fields.
//! - Coerce read status and rating, skip rows missing required text.
//!
//! # Invariants
//! - `ReadBefore` is true only for `yes|true|1` (trimmed, any case).
//! - `Rating` must be a decimal-digit string in `1..=10`, otherwise absent.
//! - Rows are created in file order; nothing is batched.

use super::{ImportRowError, TransferError};
use crate::catalog::Catalog;
use crate::model::book::{BookDraft, BookId, Rating};
use crate::repo::book_repo::RepoResult;
use csv::{ReaderBuilder, StringRecord};
use log::{info, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const TRUTHY_READ_VALUES: [&str; 3] = ["yes", "true", "1"];

/// Outcome of a completed import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<ImportRowError>,
}

#[derive(Debug, Clone, Copy, Default)]
struct ColumnMap {
    title: Option<usize>,
    author: Option<usize>,
    location: Option<usize>,
    read_before: Option<usize>,
    rating: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };
        Self {
            title: find("Title"),
            author: find("Author"),
            location: find("Location"),
            read_before: find("ReadBefore"),
            rating: find("Rating"),
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        [
            ("Title", self.title),
            ("Author", self.author),
            ("Location", self.location),
        ]
        .into_iter()
        .filter_map(|(name, index)| index.is_none().then_some(name))
        .collect()
    }
}

/// Imports a CSV file through [`Catalog::create`].
pub fn import_file(
    catalog: &Catalog,
    path: impl AsRef<Path>,
) -> Result<ImportReport, TransferError> {
    let file = File::open(path)?;
    let report = import_reader(file, |draft| catalog.create(draft))?;
    info!(
        "event=csv_import module=transfer status=ok imported={} skipped={}",
        report.imported,
        report.skipped.len()
    );
    Ok(report)
}

/// Parses CSV from `reader` and hands every accepted row to `create`.
///
/// # Errors
/// - `Io`/`Csv` when the header or the underlying reader fails.
/// - `Store` when `create` fails; rows created before it remain.
pub fn import_reader<R: Read>(
    reader: R,
    mut create: impl FnMut(&BookDraft) -> RepoResult<BookId>,
) -> Result<ImportReport, TransferError> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnMap::from_headers(csv_reader.headers()?);
    let missing = columns.missing_required();
    if !missing.is_empty() {
        warn!(
            "event=csv_import module=transfer status=degraded missing_columns={}",
            missing.join(",")
        );
    }

    let mut report = ImportReport::default();
    let mut record = StringRecord::new();
    loop {
        let line = csv_reader.position().line();
        match csv_reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {}
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                report.skipped.push(ImportRowError {
                    line: err.position().map_or(line, |pos| pos.line()),
                    reason: err.to_string(),
                });
                continue;
            }
        }

        let line = record.position().map_or(line, |pos| pos.line());
        let draft = match draft_from_record(&record, &columns) {
            Ok(draft) => draft,
            Err(reason) => {
                report.skipped.push(ImportRowError { line, reason });
                continue;
            }
        };

        create(&draft).map_err(|source| TransferError::Store {
            imported: report.imported,
            source,
        })?;
        report.imported += 1;
    }

    Ok(report)
}

fn draft_from_record(record: &StringRecord, columns: &ColumnMap) -> Result<BookDraft, String> {
    let field = |index: Option<usize>| index.and_then(|index| record.get(index));

    let read_before = field(columns.read_before)
        .map(|value| value.trim().to_ascii_lowercase())
        .is_some_and(|value| TRUTHY_READ_VALUES.contains(&value.as_str()));
    let rating = field(columns.rating).and_then(Rating::parse_digits);

    let draft = BookDraft::new(
        field(columns.title).unwrap_or_default(),
        field(columns.author).unwrap_or_default(),
        field(columns.location).unwrap_or_default(),
    )
    .read(read_before)
    .rated(rating);

    draft.validate_required().map_err(|err| err.to_string())?;
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::import_reader;
    use crate::model::book::{BookDraft, Rating};
    use crate::repo::book_repo::RepoError;

    fn collect(csv: &str) -> (Vec<BookDraft>, super::ImportReport) {
        let mut drafts = Vec::new();
        let report = import_reader(csv.as_bytes(), |draft| {
            drafts.push(draft.clone());
            Ok(drafts.len() as i64)
        })
        .expect("import should succeed");
        (drafts, report)
    }

    #[test]
    fn headers_are_matched_case_insensitively() {
        let (drafts, report) = collect(
            "title,AUTHOR,Location,readbefore,rating\nDune,Herbert,Shelf A,YES,9\n",
        );
        assert_eq!(report.imported, 1);
        assert_eq!(
            drafts[0],
            BookDraft::new("Dune", "Herbert", "Shelf A")
                .read(true)
                .rated(Rating::new(9))
        );
    }

    #[test]
    fn read_and_rating_default_when_missing_or_malformed() {
        let (drafts, _) = collect(
            "Title,Author,Location,ReadBefore,Rating\n\
             A,B,C, True ,N/A\n\
             D,E,F,nope,-3\n\
             G,H,I,,42\n",
        );
        assert_eq!(drafts.len(), 3);
        assert!(drafts[0].read_before);
        assert_eq!(drafts[0].rating, None);
        assert!(!drafts[1].read_before);
        assert_eq!(drafts[1].rating, None);
        assert_eq!(drafts[2].rating, None);
    }

    #[test]
    fn columns_absent_from_header_use_defaults() {
        let (drafts, report) = collect("Title,Author,Location\nEmma,Austen,Den\n");
        assert_eq!(report.imported, 1);
        assert!(!drafts[0].read_before);
        assert_eq!(drafts[0].rating, None);
    }

    #[test]
    fn rows_missing_required_text_are_skipped_with_line_numbers() {
        let (drafts, report) = collect(
            "Title,Author,Location\n\
             Emma,Austen,Den\n\
             ,Nobody,Den\n\
             Short,Row\n\
             Ulysses,Joyce,Attic\n",
        );
        assert_eq!(drafts.len(), 2);
        assert_eq!(report.imported, 2);
        let lines = report.skipped.iter().map(|row| row.line).collect::<Vec<_>>();
        assert_eq!(lines, vec![3, 4]);
        assert!(report.skipped[0].reason.contains("title"));
        assert!(report.skipped[1].reason.contains("location"));
    }

    #[test]
    fn padded_rating_is_absent_but_padded_read_flag_counts() {
        let (drafts, _) = collect("Title,Author,Location,ReadBefore,Rating\nX,Y,Z, yes , 7\n");
        assert!(drafts[0].read_before);
        assert_eq!(drafts[0].rating, None);
    }

    #[test]
    fn undecodable_row_is_skipped_and_later_rows_import() {
        let mut titles = Vec::new();
        let report = import_reader(
            &b"Title,Author,Location\nA,B,C\n\xff\xfe,B,C\nD,E,F\n"[..],
            |draft| {
                titles.push(draft.title.clone());
                Ok(titles.len() as i64)
            },
        )
        .expect("import should succeed");

        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 3);
        assert_eq!(titles, vec!["A", "D"]);
    }

    #[test]
    fn storage_failure_aborts_with_committed_count() {
        let mut calls = 0;
        let err = import_reader(
            "Title,Author,Location\nA,B,C\nD,E,F\n".as_bytes(),
            |_| {
                calls += 1;
                if calls == 2 {
                    Err(RepoError::InvalidData("disk full".to_string()))
                } else {
                    Ok(calls)
                }
            },
        )
        .expect_err("second create should abort the import");
        match err {
            super::TransferError::Store { imported, .. } => assert_eq!(imported, 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
