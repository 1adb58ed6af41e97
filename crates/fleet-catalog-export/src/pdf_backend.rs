// SPDX-License-Identifier: Apache-2.0

use crate::document::{decode_data_uri, DocumentWriter, FontWeight, Rgb, MM_PER_PT};
use crate::error::{ExportError, ExportErrorCode};
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point,
};

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;
const LAYER_NAME: &str = "content";
const IMAGE_DPI: f32 = 300.0;

/// A4 portrait PDF built with `printpdf` and the builtin Helvetica faces.
pub struct PdfDocumentWriter {
    doc: Option<PdfDocumentReference>,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    font_size: f32,
    weight: FontWeight,
    text_color: Rgb,
    draw_color: Rgb,
    line_width: f32,
}

impl PdfDocumentWriter {
    pub fn a4(title: &str) -> Result<Self, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| unavailable("helvetica", e))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| unavailable("helvetica bold", e))?;
        let layer = doc.get_page(page).get_layer(layer);
        let mut writer = Self {
            doc: Some(doc),
            layer,
            regular,
            bold,
            font_size: 16.0,
            weight: FontWeight::Normal,
            text_color: Rgb::BLACK,
            draw_color: Rgb::BLACK,
            line_width: 0.2,
        };
        writer.apply_graphics_state();
        Ok(writer)
    }

    fn pdf_y(y: f32) -> Mm {
        Mm(A4_HEIGHT_MM - y)
    }

    fn apply_graphics_state(&mut self) {
        self.layer.set_fill_color(pdf_color(self.text_color));
        self.layer.set_outline_color(pdf_color(self.draw_color));
        self.layer.set_outline_thickness(self.line_width / MM_PER_PT);
    }
}

fn unavailable(what: &str, err: impl std::fmt::Display) -> ExportError {
    ExportError::new(ExportErrorCode::Unavailable, format!("{what}: {err}"))
}

fn pdf_color(color: Rgb) -> Color {
    let channel = |v: u8| f32::from(v) / 255.0;
    Color::Rgb(printpdf::Rgb::new(
        channel(color.0),
        channel(color.1),
        channel(color.2),
        None,
    ))
}

impl DocumentWriter for PdfDocumentWriter {
    fn page_size(&self) -> (f32, f32) {
        (A4_WIDTH_MM, A4_HEIGHT_MM)
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }

    fn set_font_size(&mut self, points: f32) {
        self.font_size = points;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
        self.layer.set_fill_color(pdf_color(color));
    }

    fn set_font_weight(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        let font = match self.weight {
            FontWeight::Normal => &self.regular,
            FontWeight::Bold => &self.bold,
        };
        self.layer
            .use_text(text, self.font_size, Mm(x), Self::pdf_y(y), font);
    }

    fn add_image(
        &mut self,
        source: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), ExportError> {
        let (_, bytes) = decode_data_uri(source)?;
        let decoded = image_crate::load_from_memory(&bytes)
            .map_err(|e| ExportError::generation("decode image", e))?;
        let (px_w, px_h) = GenericImageView::dimensions(&decoded);
        if px_w == 0 || px_h == 0 {
            return Err(ExportError::generation("decode image", "empty image"));
        }
        let natural_w = px_w as f32 / IMAGE_DPI * 25.4;
        let natural_h = px_h as f32 / IMAGE_DPI * 25.4;
        let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(decoded.to_rgb8()));
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Self::pdf_y(y + height)),
                scale_x: Some(width / natural_w),
                scale_y: Some(height / natural_h),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn add_page(&mut self) {
        let Some(doc) = self.doc.as_ref() else {
            tracing::warn!("page added after the document was finished");
            return;
        };
        let (page, layer) = doc.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), LAYER_NAME);
        self.layer = doc.get_page(page).get_layer(layer);
        self.apply_graphics_state();
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
        self.layer.set_outline_thickness(width / MM_PER_PT);
    }

    fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
        self.layer.set_outline_color(pdf_color(color));
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Self::pdf_y(y1)), false),
                (Point::new(Mm(x2), Self::pdf_y(y2)), false),
            ],
            is_closed: false,
        });
    }

    fn finish(&mut self) -> Result<Vec<u8>, ExportError> {
        let doc = self.doc.take().ok_or_else(|| {
            ExportError::new(ExportErrorCode::Generation, "document already finished")
        })?;
        doc.save_to_bytes()
            .map_err(|e| ExportError::generation("pdf encode", e))
    }
}
