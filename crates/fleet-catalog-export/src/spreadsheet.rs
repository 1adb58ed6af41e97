// SPDX-License-Identifier: Apache-2.0

use crate::error::ExportError;
use fleet_catalog_model::Item;

pub const SHEET_NAME: &str = "Catálogo";

pub const SPREADSHEET_HEADER: [&str; 10] = [
    "Categoria",
    "Marca",
    "Modelo",
    "Tipo",
    "Año",
    "Dominio",
    "Combustible",
    "Capacidad",
    "Equipamiento",
    "Rastreo Satelital",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn text(value: impl ToString) -> Self {
        Self::Text(value.to_string())
    }
}

/// Backend-neutral worksheet: a header row followed by data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Turns a sheet into workbook bytes.
pub trait SpreadsheetWriter {
    fn render(&mut self, sheet: &Sheet) -> Result<Vec<u8>, ExportError>;
}

/// One row per item, in collection order.
#[must_use]
pub fn catalog_sheet(items: &[Item]) -> Sheet {
    let rows = items
        .iter()
        .map(|item| {
            vec![
                Cell::text(item.category),
                Cell::text(&item.brand),
                Cell::text(&item.model),
                Cell::text(&item.kind),
                Cell::Number(f64::from(item.year)),
                Cell::text(&item.domain),
                Cell::text(item.fuel),
                Cell::text(&item.capacity),
                Cell::text(&item.equipment),
                Cell::text(item.satellite_tracking),
            ]
        })
        .collect();
    Sheet {
        name: SHEET_NAME.to_string(),
        header: SPREADSHEET_HEADER.iter().map(|h| (*h).to_string()).collect(),
        rows,
    }
}

pub fn export_spreadsheet<W: SpreadsheetWriter + ?Sized>(
    writer: &mut W,
    items: &[Item],
) -> Result<Vec<u8>, ExportError> {
    let sheet = catalog_sheet(items);
    let bytes = writer.render(&sheet)?;
    tracing::info!(rows = sheet.rows.len(), bytes = bytes.len(), "spreadsheet rendered");
    Ok(bytes)
}
