// SPDX-License-Identifier: Apache-2.0

use crate::error::{ExportError, ExportErrorCode};
use base64::Engine as _;

/// Millimetres per typographic point.
pub(crate) const MM_PER_PT: f32 = 0.352_778;

/// Average Helvetica glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0, 0, 0);

    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self(level, level, level)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Page-oriented drawing surface. Coordinates are millimetres from the
/// top-left corner of the current page.
pub trait DocumentWriter {
    /// Width and height of a page in millimetres.
    fn page_size(&self) -> (f32, f32);
    fn font_size(&self) -> f32;
    fn set_font_size(&mut self, points: f32);
    fn set_text_color(&mut self, color: Rgb);
    fn set_font_weight(&mut self, weight: FontWeight);
    fn text(&mut self, text: &str, x: f32, y: f32);
    /// Places an image payload (`data:` URI) in the given box. Failing to
    /// use the payload is an error the caller may recover from.
    fn add_image(
        &mut self,
        source: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), ExportError>;
    fn add_page(&mut self);
    fn set_line_width(&mut self, width: f32);
    fn set_draw_color(&mut self, color: Rgb);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    fn finish(&mut self) -> Result<Vec<u8>, ExportError>;

    /// Breaks `text` into lines no wider than `width` at the current size.
    fn split_text_to_size(&self, text: &str, width: f32) -> Vec<String> {
        wrap_text(text, width, self.font_size())
    }
}

/// Greedy word wrap using an average glyph width. Words longer than a line
/// are kept whole on their own line.
#[must_use]
pub fn wrap_text(text: &str, width_mm: f32, font_size_pt: f32) -> Vec<String> {
    let glyph_mm = font_size_pt * MM_PER_PT * AVG_GLYPH_WIDTH;
    let max_chars = if glyph_mm > 0.0 {
        ((width_mm / glyph_mm).floor() as usize).max(1)
    } else {
        usize::MAX
    };

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0_usize;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if current_len > 0 && current_len + 1 + word_len > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }
        lines.push(current);
    }
    lines
}

/// Splits a `data:<mime>;base64,<payload>` URI into its media type and
/// decoded bytes. Remote URLs are not fetched.
pub fn decode_data_uri(source: &str) -> Result<(String, Vec<u8>), ExportError> {
    let Some(rest) = source.strip_prefix("data:") else {
        return Err(ExportError::new(
            ExportErrorCode::Unavailable,
            "only embedded data: images can be placed in a document",
        ));
    };
    let (meta, payload) = rest.split_once(',').ok_or_else(|| {
        ExportError::new(ExportErrorCode::Generation, "data URI has no payload")
    })?;
    let Some(mime) = meta.strip_suffix(";base64") else {
        return Err(ExportError::new(
            ExportErrorCode::Generation,
            "data URI is not base64 encoded",
        ));
    };
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ExportError::generation("data URI payload", e))?;
    Ok((mime.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_words_and_respects_width() {
        let lines = wrap_text("Grua hidraulica con pluma telescopica y malacate", 30.0, 11.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 15, "line too long: {line}");
        }
        assert_eq!(
            lines.join(" "),
            "Grua hidraulica con pluma telescopica y malacate"
        );
    }

    #[test]
    fn wrap_of_blank_text_is_one_empty_line() {
        assert_eq!(wrap_text("", 120.0, 11.0), vec![String::new()]);
    }

    #[test]
    fn data_uri_decoding() {
        let (mime, bytes) = decode_data_uri("data:image/png;base64,aGk/").expect("decode");
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"hi?");
        assert_eq!(
            decode_data_uri("https://cdn.example/a.jpg")
                .expect_err("remote")
                .code,
            ExportErrorCode::Unavailable
        );
        assert!(decode_data_uri("data:image/png,raw").is_err());
    }
}
