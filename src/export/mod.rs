//! Tabular projections of the visible views, ready for spreadsheet output.
//!
//! Builders take records in the order they are shown and never re-sort them.
//! Each builder returns an [`ExportBook`]; [`write_workbook`] renders it to
//! an `.xlsx` file.

pub mod fixtures;
pub mod players;
pub mod standings;
pub mod training;
pub mod workbook;

use serde::Serialize;

pub use fixtures::{fixtures_book, match_stats_book, match_stats_file_name};
pub use players::{export_jersey, nationality_label, player_rows, players_book, youth_book};
pub use standings::{standings_book, StandingsView};
pub use training::training_book;
pub use workbook::write_workbook;

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Text cell, or an empty one for an empty string.
    pub fn text_or_empty(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Number(f64::from(value))
    }
}

impl From<u8> for Cell {
    fn from(value: u8) -> Self {
        Cell::Number(f64::from(value))
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}

/// One worksheet: a header row and data rows of the same width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub sheet: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(sheet: impl Into<String>, columns: &[&'static str]) -> Self {
        Self {
            sheet: sheet.into(),
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width mismatch");
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == name)
    }

    /// Cell at `row` under column `name`.
    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        let col = self.column_index(name)?;
        self.rows.get(row)?.get(col)
    }
}

/// A workbook: file name plus its sheets in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportBook {
    pub file_name: String,
    pub sheets: Vec<Table>,
}

impl ExportBook {
    pub fn single(file_name: impl Into<String>, table: Table) -> Self {
        Self {
            file_name: file_name.into(),
            sheets: vec![table],
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Table> {
        self.sheets.iter().find(|t| t.sheet == name)
    }
}
