//! Optional pixel font for sharp text rendering
//!
//! Falls back to macroquad's built-in font when the TTF is not shipped.

use macroquad::prelude::*;

pub struct PixelFont {
    font: Option<Font>,
}

impl PixelFont {
    /// Load the font, falling back gracefully
    pub async fn load_or_default(path: &str) -> Self {
        let font = match load_ttf_font(path).await {
            Ok(mut font) => {
                font.set_filter(FilterMode::Nearest);
                Some(font)
            }
            Err(e) => {
                log::warn!("Failed to load font {}: {}. Using built-in font.", path, e);
                None
            }
        };
        Self { font }
    }

    /// Draw text with pixel-perfect positioning
    pub fn draw_text(&self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        if let Some(font) = &self.font {
            draw_text_ex(
                text,
                x.floor(),
                y.floor(),
                TextParams {
                    font: Some(font),
                    font_size: font_size.round() as u16,
                    color,
                    ..Default::default()
                },
            );
        } else {
            draw_text(text, x.floor(), y.floor(), font_size, color);
        }
    }

    /// Measure text at the specified size
    pub fn measure_text(&self, text: &str, font_size: f32) -> TextDimensions {
        measure_text(text, self.font.as_ref(), font_size.round() as u16, 1.0)
    }
}
