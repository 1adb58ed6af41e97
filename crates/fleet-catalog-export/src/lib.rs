// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Catalog exports: spreadsheet, per-item datasheet and the portable
//! snapshot. Spreadsheet and document generation go through the
//! [`SpreadsheetWriter`] and [`DocumentWriter`] capabilities so layouts can
//! be exercised without a real backend.

mod artifact;
mod datasheet;
mod document;
mod error;
mod pdf_backend;
mod snapshot;
mod spreadsheet;
mod xlsx_backend;

pub use artifact::{write_artifact, Artifact};
pub use datasheet::{export_datasheet, render_datasheet, DatasheetLayout, IMAGE_PLACEHOLDER};
pub use document::{decode_data_uri, wrap_text, DocumentWriter, FontWeight, Rgb};
pub use error::{ExportError, ExportErrorCode};
pub use pdf_backend::PdfDocumentWriter;
pub use snapshot::{generate_snapshot, SnapshotBuilder, SNAPSHOT_LIBRARIES};
pub use spreadsheet::{
    catalog_sheet, export_spreadsheet, Cell, Sheet, SpreadsheetWriter, SHEET_NAME,
    SPREADSHEET_HEADER,
};
pub use xlsx_backend::XlsxWriter;

pub const CRATE_NAME: &str = "fleet-catalog-export";
