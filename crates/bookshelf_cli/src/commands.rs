//! Command handlers: translate one user action into store calls and output.
//!
//! Handlers hold no state between invocations; every view is re-queried.

use crate::error::CliError;
use crate::forms::{AddForm, EditForm};
use crate::render::{write_book, write_table};
use bookshelf_core::transfer::{export_file, import_file};
use bookshelf_core::{BookId, Catalog, RepoError, SearchQuery, SortOrder, TableView};
use log::info;
use std::io::{BufRead, Write};
use std::path::Path;

/// Output mode for record listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

pub fn add(catalog: &Catalog, form: AddForm, out: &mut impl Write) -> Result<(), CliError> {
    let draft = form.into_draft()?;
    let id = catalog.create(&draft)?;
    info!("event=cli_add module=cli status=ok id={id}");
    writeln!(out, "Book added! (id {id})")?;
    Ok(())
}

pub fn find(
    catalog: &Catalog,
    query: &SearchQuery,
    order: Option<SortOrder>,
    output: Output,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let view = TableView::query(catalog, query, order)?;
    match output {
        Output::Json => {
            serde_json::to_writer_pretty(&mut *out, &view.rows)?;
            writeln!(out)?;
        }
        Output::Text if view.is_empty() => writeln!(out, "No books found.")?,
        Output::Text => write_table(out, &view.rows)?,
    }
    Ok(())
}

pub fn show(
    catalog: &Catalog,
    id: BookId,
    output: Output,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let book = catalog.get(id)?.ok_or(RepoError::NotFound(id))?;
    match output {
        Output::Json => {
            serde_json::to_writer_pretty(&mut *out, &book)?;
            writeln!(out)?;
        }
        Output::Text => write_book(out, &book)?,
    }
    Ok(())
}

pub fn edit(
    catalog: &Catalog,
    id: BookId,
    form: EditForm,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let book = catalog.get(id)?.ok_or(RepoError::NotFound(id))?;
    catalog.update(id, &form.apply(&book))?;
    writeln!(out, "Book updated!")?;
    Ok(())
}

/// Deletes after confirmation; `assume_yes` skips the prompt.
pub fn delete(
    catalog: &Catalog,
    id: BookId,
    assume_yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if !assume_yes && !confirm(input, out, "Are you sure you want to delete this book?")? {
        writeln!(out, "Delete cancelled.")?;
        return Ok(());
    }
    catalog.delete(id)?;
    writeln!(out, "Book deleted")?;
    Ok(())
}

pub fn import(
    catalog: &Catalog,
    path: &Path,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(), CliError> {
    let report = import_file(catalog, path)?;
    for skipped in &report.skipped {
        writeln!(err, "skipped {skipped}")?;
    }
    writeln!(out, "Imported {} books from CSV.", report.imported)?;
    Ok(())
}

pub fn export(
    catalog: &Catalog,
    path: &Path,
    query: &SearchQuery,
    order: Option<SortOrder>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let view = TableView::query(catalog, query, order)?;
    let written = export_file(path, &view)?;
    writeln!(out, "Exported {written} books to {}", path.display())?;
    Ok(())
}

fn confirm(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> Result<bool, CliError> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
