//! CSV serialization of to-dos
//!
//! The header row is the field order of the first to-do. Every following row
//! is laid out by that header: a to-do lacking one of its fields gets an empty
//! cell, and fields the header does not name are dropped.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::basecamp::{render_value, Todo};

/// Default output file for `todos export`
pub const DEFAULT_EXPORT_PATH: &str = "basecamp-export.csv";

/// Error type for export operations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Nothing to export: no to-dos were found")]
    EmptyExportSet,

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Header row for a batch of to-dos
pub fn header(todos: &[Todo]) -> Result<Vec<String>, ExportError> {
    todos
        .first()
        .map(Todo::field_names)
        .ok_or(ExportError::EmptyExportSet)
}

/// Cells of one to-do, in header order
pub fn row(todo: &Todo, header: &[String]) -> Vec<String> {
    header
        .iter()
        .map(|name| {
            todo.field_value(name)
                .map(|value| render_value(&value))
                .unwrap_or_default()
        })
        .collect()
}

/// Write to-dos as CSV to any writer
pub fn write_todos<W: Write>(writer: W, todos: &[Todo]) -> Result<(), ExportError> {
    let header = header(todos)?;

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(&header)?;
    for todo in todos {
        wtr.write_record(row(todo, &header))?;
    }

    wtr.flush()?;

    Ok(())
}

/// Write to-dos to a CSV file, replacing any existing file
///
/// Fails before touching the filesystem when there is nothing to export.
pub fn export_todos(path: &Path, todos: &[Todo]) -> Result<(), ExportError> {
    if todos.is_empty() {
        return Err(ExportError::EmptyExportSet);
    }

    let file = File::create(path)?;
    write_todos(file, todos)
}
