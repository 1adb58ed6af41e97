// SPDX-License-Identifier: Apache-2.0

use crate::error::ExportError;
use crate::spreadsheet::{Cell, Sheet, SpreadsheetWriter};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

/// `.xlsx` output through `rust_xlsxwriter`, rendered fully in memory.
#[derive(Debug, Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SpreadsheetWriter for XlsxWriter {
    fn render(&mut self, sheet: &Sheet) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet.name.as_str())
            .map_err(|e| ExportError::generation("sheet name", e))?;

        let bold = Format::new().set_bold();
        for (col, title) in sheet.header.iter().enumerate() {
            worksheet
                .write_string_with_format(0, column(col)?, title.as_str(), &bold)
                .map_err(|e| ExportError::generation("header cell", e))?;
        }
        for (idx, row) in sheet.rows.iter().enumerate() {
            let row_num = u32::try_from(idx + 1)
                .map_err(|_| ExportError::generation("row index", idx))?;
            for (col, cell) in row.iter().enumerate() {
                write_cell(worksheet, row_num, column(col)?, cell)?;
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| ExportError::generation("xlsx encode", e))
    }
}

fn column(index: usize) -> Result<u16, ExportError> {
    u16::try_from(index).map_err(|_| ExportError::generation("column index", index))
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), ExportError> {
    let written = match cell {
        Cell::Text(text) => ws.write_string(row, col, text.as_str()),
        Cell::Number(value) => ws.write_number(row, col, *value),
    };
    written
        .map(|_| ())
        .map_err(|e| ExportError::generation("data cell", e))
}
