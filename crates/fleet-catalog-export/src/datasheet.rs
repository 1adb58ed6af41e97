// SPDX-License-Identifier: Apache-2.0

use crate::artifact::Artifact;
use crate::document::{DocumentWriter, FontWeight, Rgb};
use crate::error::ExportError;
use fleet_catalog_core::BrandProfile;
use fleet_catalog_model::{datasheet_file_name, datasheet_rows, Item};

pub const IMAGE_PLACEHOLDER: &str = "[Imagen no disponible en PDF]";

const BRAND_RED: Rgb = Rgb(213, 35, 42);

/// Geometry of a datasheet page, in millimetres and points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasheetLayout {
    pub margin: f32,
    pub top: f32,
    pub image_width: f32,
    pub image_height: f32,
    pub value_offset: f32,
    pub row_step: f32,
    pub page_break_at: f32,
    pub wrap_width: f32,
    pub footer_rule_from_bottom: f32,
    pub footer_text_from_bottom: f32,
}

impl Default for DatasheetLayout {
    fn default() -> Self {
        Self {
            margin: 15.0,
            top: 20.0,
            image_width: 180.0,
            image_height: 100.0,
            value_offset: 50.0,
            row_step: 7.0,
            page_break_at: 270.0,
            wrap_width: 120.0,
            footer_rule_from_bottom: 25.0,
            footer_text_from_bottom: 15.0,
        }
    }
}

/// Draws one item's datasheet. A cover image that cannot be placed is
/// replaced by placeholder text.
pub fn render_datasheet<W: DocumentWriter + ?Sized>(
    doc: &mut W,
    layout: &DatasheetLayout,
    item: &Item,
    brand: &BrandProfile,
) {
    let margin = layout.margin;
    let mut y = layout.top;

    doc.set_font_size(22.0);
    doc.set_text_color(BRAND_RED);
    doc.text(&brand.company_name, margin, y);
    doc.set_font_size(12.0);
    doc.set_text_color(Rgb::gray(100));
    doc.text(&brand.datasheet_title, margin, y + 8.0);
    y += 20.0;

    doc.set_font_size(18.0);
    doc.set_text_color(Rgb::gray(40));
    doc.text(&item.display_name(), margin, y);
    y += 10.0;

    match item.cover_image() {
        Some(cover) => match doc.add_image(
            cover,
            margin,
            y,
            layout.image_width,
            layout.image_height,
        ) {
            Ok(()) => y += layout.image_height + 10.0,
            Err(err) => {
                tracing::warn!(item = %item.id, error = %err, "cover image not embedded");
                doc.set_font_size(10.0);
                doc.set_text_color(Rgb::gray(150));
                doc.text(IMAGE_PLACEHOLDER, margin, y + 10.0);
                y += 20.0;
            }
        },
        None => y += 10.0,
    }

    doc.set_font_size(11.0);
    doc.set_text_color(Rgb::BLACK);
    for row in datasheet_rows(item) {
        if y > layout.page_break_at {
            doc.add_page();
            y = layout.top;
        }
        let label = format!("{}:", row.label);
        doc.set_font_weight(FontWeight::Bold);
        doc.text(&label, margin, y);
        doc.set_font_weight(FontWeight::Normal);
        if row.wrap {
            // Continuation lines may spill onto a new page.
            for line in doc.split_text_to_size(&row.value, layout.wrap_width) {
                if y > layout.page_break_at {
                    doc.add_page();
                    y = layout.top;
                }
                doc.text(&line, margin + layout.value_offset, y);
                y += layout.row_step;
            }
        } else {
            doc.text(&row.value, margin + layout.value_offset, y);
            y += layout.row_step;
        }
    }

    let (page_width, page_height) = doc.page_size();
    doc.set_line_width(0.5);
    doc.set_draw_color(Rgb::gray(200));
    let rule_y = page_height - layout.footer_rule_from_bottom;
    doc.line(margin, rule_y, page_width - margin, rule_y);
    doc.set_font_size(8.0);
    doc.set_text_color(Rgb::gray(150));
    doc.text(
        &brand.footer_line(),
        margin,
        page_height - layout.footer_text_from_bottom,
    );
}

/// Renders and encodes an item's datasheet under its derived file name.
pub fn export_datasheet<W: DocumentWriter + ?Sized>(
    doc: &mut W,
    item: &Item,
    brand: &BrandProfile,
) -> Result<Artifact, ExportError> {
    render_datasheet(doc, &DatasheetLayout::default(), item, brand);
    let bytes = doc.finish()?;
    let file_name = datasheet_file_name(item);
    tracing::info!(item = %item.id, file = %file_name, bytes = bytes.len(), "datasheet rendered");
    Ok(Artifact { file_name, bytes })
}
