//! Plain-text rendering of the table view and single records.

use bookshelf_core::view::table::{CatalogRow, SortColumn};
use bookshelf_core::Book;
use std::io::{self, Write};

const COLUMN_GAP: &str = "  ";

fn cells(row: &CatalogRow) -> [String; 6] {
    [
        row.id.to_string(),
        row.title.clone(),
        row.author.clone(),
        row.location.clone(),
        row.read_before.clone(),
        row.rating.clone(),
    ]
}

/// Writes a header line plus one aligned line per row.
pub fn write_table(out: &mut impl Write, rows: &[CatalogRow]) -> io::Result<()> {
    let headers = SortColumn::ALL.map(SortColumn::header);
    let body = rows.iter().map(cells).collect::<Vec<_>>();

    let mut widths = headers.map(|header| header.chars().count());
    for line in &body {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(out, &widths, headers.iter().copied())?;
    for line in &body {
        write_line(out, &widths, line.iter().map(String::as_str))?;
    }
    Ok(())
}

fn write_line<'a>(
    out: &mut impl Write,
    widths: &[usize; 6],
    cells: impl Iterator<Item = &'a str>,
) -> io::Result<()> {
    let line = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    writeln!(out, "{}", line.trim_end())
}

/// Writes one record as labelled fields, the way the edit form preloads it.
pub fn write_book(out: &mut impl Write, book: &Book) -> io::Result<()> {
    let row = CatalogRow::from(book);
    for (header, value) in SortColumn::ALL.iter().zip(cells(&row)) {
        writeln!(out, "{:<10} {}", format!("{}:", header.header()), value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_book, write_table};
    use bookshelf_core::view::table::CatalogRow;
    use bookshelf_core::{Book, Rating};

    #[test]
    fn table_columns_are_aligned_to_widest_cell() {
        let rows = vec![CatalogRow::from(&Book {
            id: 12,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            location: "A".to_string(),
            read_before: true,
            rating: Rating::new(9),
        })];
        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(
            lines[0],
            "ID  Title  Author         Location  ReadBefore  Rating"
        );
        assert_eq!(lines[1], "12  Dune   Frank Herbert  A         Yes         9");
    }

    #[test]
    fn book_fields_are_labelled() {
        let mut out = Vec::new();
        write_book(
            &mut out,
            &Book {
                id: 1,
                title: "Emma".to_string(),
                author: "Austen".to_string(),
                location: "Den".to_string(),
                read_before: false,
                rating: None,
            },
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Title:     Emma\n"));
        assert!(text.contains("Rating:    N/A\n"));
    }
}
