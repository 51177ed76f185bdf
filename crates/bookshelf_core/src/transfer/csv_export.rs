//! CSV export of the displayed table.
//!
//! Rows are written exactly as displayed, including `Yes`/`No` and the
//! `N/A` rating sentinel.

use super::TransferError;
use crate::view::table::{CatalogRow, TableView};
use csv::Writer;
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const EXPORT_HEADERS: [&str; 6] = ["ID", "Title", "Author", "Location", "ReadBefore", "Rating"];

/// Writes the header and `rows` to `writer`; returns the number of rows.
pub fn write_export<W: Write>(writer: W, rows: &[CatalogRow]) -> Result<usize, TransferError> {
    let mut csv_writer = Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer.write_record(EXPORT_HEADERS)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(rows.len())
}

/// Exports the current view to `path`.
///
/// # Errors
/// - `NothingToExport` when the view has no rows; no file is created.
pub fn export_file(path: impl AsRef<Path>, view: &TableView) -> Result<usize, TransferError> {
    if view.is_empty() {
        return Err(TransferError::NothingToExport);
    }

    let file = File::create(path.as_ref())?;
    let written = write_export(file, &view.rows)?;
    info!("event=csv_export module=transfer status=ok rows={written}");
    Ok(written)
}
