//! FILENAME: persistence/src/xlsx_writer.rs
//! Plain XLSX export of a result grid: one header row, then values.

use std::path::Path;
use rust_xlsxwriter::{Workbook, Worksheet};
use engine::{format_number, CellValue, ResultSet};
use pivot_engine::PivotedData;
use crate::PersistenceError;

/// Writes `result` to a single-sheet workbook at `path`.
/// Sentinel results are refused rather than exported as data.
pub fn save_result_set_xlsx(
    result: &ResultSet,
    sheet_name: &str,
    path: &Path,
) -> Result<(), PersistenceError> {
    if let Some(sentinel) = result.detect_sentinel() {
        return Err(PersistenceError::InvalidFormat(format!(
            "cannot export a sentinel result ({})",
            sentinel
        )));
    }
    if result.col_count() > u16::MAX as usize {
        return Err(PersistenceError::InvalidFormat(format!(
            "{} columns exceed the sheet width",
            result.col_count()
        )));
    }

    let mut xlsx = Workbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in result.columns().iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }

    for (row, cells) in result.rows().iter().enumerate() {
        let row = u32::try_from(row + 1).map_err(|_| {
            PersistenceError::InvalidFormat("row count exceeds the sheet height".to_string())
        })?;
        for (col, cell) in cells.iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell)?;
        }
    }

    xlsx.save(path)?;
    log::info!(
        "exported {} rows x {} columns to {}",
        result.row_count(),
        result.col_count(),
        path.display()
    );
    Ok(())
}

/// Writes a pivot table: the x column followed by one column per y value.
/// Cells with no contributing rows are left blank.
pub fn save_pivot_xlsx(
    pivoted: &PivotedData,
    sheet_name: &str,
    path: &Path,
) -> Result<(), PersistenceError> {
    save_result_set_xlsx(&pivoted.to_result_set(), sheet_name, path)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
) -> Result<(), PersistenceError> {
    match cell {
        CellValue::Empty => {}
        // Excel has no NaN or infinity
        CellValue::Number(n) if !n.is_finite() => {
            worksheet.write_string(row, col, format_number(*n))?;
        }
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Boolean(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}
