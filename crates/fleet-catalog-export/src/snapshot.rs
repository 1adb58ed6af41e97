// SPDX-License-Identifier: Apache-2.0

//! Portable snapshot: one standalone HTML document carrying the whole
//! collection as inline data plus the viewer script that renders it.
//!
//! The document is assembled from two separately produced parts, the
//! serialized data payload and the static viewer logic, spliced into a
//! fixed shell. Styling and the in-page PDF engine are still fetched from
//! the versioned CDN URLs in [`SNAPSHOT_LIBRARIES`] when the file is opened.

use crate::artifact::Artifact;
use crate::error::{ExportError, ExportErrorCode};
use fleet_catalog_core::canonical::script_safe_json;
use fleet_catalog_core::BrandProfile;
use fleet_catalog_model::Item;
use serde::Serialize;

const SHELL: &str = include_str!("../assets/shell.html");
const VIEWER_SCRIPT: &str = include_str!("../assets/viewer.js");
const DATA_MARKER: &str = "__CATALOG_DATA__";

/// External resources referenced by the snapshot, in document order.
pub const SNAPSHOT_LIBRARIES: [&str; 3] = [
    r#"<script src="https://cdn.tailwindcss.com"></script>"#,
    r#"<script src="https://cdnjs.cloudflare.com/ajax/libs/jspdf/2.5.1/jspdf.umd.min.js"></script>"#,
    r#"<link href="https://fonts.googleapis.com/css2?family=Poppins:wght@300;400;500;700&display=swap" rel="stylesheet">"#,
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewerBrand<'a> {
    company_name: &'a str,
    datasheet_title: &'a str,
    footer_line: String,
}

pub struct SnapshotBuilder<'a> {
    brand: &'a BrandProfile,
    file_name: String,
}

impl<'a> SnapshotBuilder<'a> {
    #[must_use]
    pub fn new(brand: &'a BrandProfile, file_name: impl Into<String>) -> Self {
        Self {
            brand,
            file_name: file_name.into(),
        }
    }

    /// Renders the document text. Item payloads are embedded verbatim;
    /// nothing about them is validated here.
    pub fn render(&self, items: &[Item]) -> Result<String, ExportError> {
        let data = script_safe_json(&items)
            .map_err(|e| ExportError::generation("serialize catalog data", e))?;
        let brand_data = script_safe_json(&ViewerBrand {
            company_name: &self.brand.company_name,
            datasheet_title: &self.brand.datasheet_title,
            footer_line: self.brand.footer_line(),
        })
        .map_err(|e| ExportError::generation("serialize brand data", e))?;

        let (head, tail) = SHELL.split_once(DATA_MARKER).ok_or_else(|| {
            ExportError::new(ExportErrorCode::Unavailable, "snapshot shell has no data slot")
        })?;
        let head = self.fill_chrome(head);
        let tail = self
            .fill_chrome(tail)
            .replacen("__VIEWER_SCRIPT__", VIEWER_SCRIPT.trim_end(), 1)
            .replacen("__BRAND_DATA__", &brand_data, 1);

        let mut out = String::with_capacity(head.len() + data.len() + tail.len());
        out.push_str(&head);
        out.push_str(&data);
        out.push_str(&tail);
        tracing::info!(items = items.len(), bytes = out.len(), "snapshot generated");
        Ok(out)
    }

    pub fn build(&self, items: &[Item]) -> Result<Artifact, ExportError> {
        Ok(Artifact {
            file_name: self.file_name.clone(),
            bytes: self.render(items)?.into_bytes(),
        })
    }

    fn fill_chrome(&self, segment: &str) -> String {
        let brand = self.brand;
        let mut initial = brand.short_name.chars();
        let logo_initial = initial.next().map(String::from).unwrap_or_default();
        let logo_rest: String = initial.collect();
        let contact = match brand.phones.first() {
            Some(phone) => format!("{} | {}", brand.email, phone),
            None => brand.email.clone(),
        };
        let title = format!("{} - Catálogo de Flota", brand.short_name);

        segment
            .replace("__LIBRARIES__", &libraries_block())
            .replace("__PAGE_TITLE__", &escape_html(&title))
            .replace("__LOGO_INITIAL__", &escape_html(&logo_initial))
            .replace("__LOGO_REST__", &escape_html(&logo_rest))
            .replace("__TAGLINE__", &escape_html(&brand.tagline))
            .replace("__ADDRESS__", &escape_html(&brand.address))
            .replace("__CONTACT__", &escape_html(&contact))
            .replace("__WEBSITE__", &escape_html(&brand.website))
            .replace("__EMAIL__", &escape_html(&brand.email))
    }
}

pub fn generate_snapshot(items: &[Item], brand: &BrandProfile) -> Result<String, ExportError> {
    SnapshotBuilder::new(brand, String::new()).render(items)
}

fn libraries_block() -> String {
    SNAPSHOT_LIBRARIES
        .iter()
        .map(|tag| format!("    {tag}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
