//! `.xlsx` rendering for export books.

use std::path::{Path, PathBuf};

use log::info;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::{
    error::Result,
    export::{Cell, ExportBook, Table},
};

fn write_table(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    worksheet.set_name(&table.sheet)?;
    for (col, header) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (idx, row) in table.rows.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col as u16, *n)?;
                }
                Cell::Text(t) => {
                    worksheet.write_string(row_num, col as u16, t)?;
                }
                Cell::Empty => {}
            }
        }
    }
    Ok(())
}

/// Write `book` into `dir` under its own file name and return the full path.
pub fn write_workbook(book: &ExportBook, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&book.file_name);

    let mut workbook = Workbook::new();
    for table in &book.sheets {
        let sheet = workbook.add_worksheet();
        write_table(sheet, table)?;
    }
    workbook.save(&path)?;

    let rows: usize = book.sheets.iter().map(|t| t.rows.len()).sum();
    info!("Exported {} rows to {}", rows, path.display());
    Ok(path)
}
