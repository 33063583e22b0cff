//! Text measurement
//!
//! Placement only needs the size of the text box. Glyph-accurate
//! measurement belongs to whoever renders the stamp, so it is a trait;
//! [`AverageCharWidth`] is a font-independent estimate.

use crate::constants::*;
use crate::types::Alphabet;

use super::BoxSize;

pub trait TextMetrics {
    /// Advance width of one character at `font_size`
    fn char_width(&self, alphabet: Alphabet, font_size: f32) -> f32;

    fn line_height(&self, _alphabet: Alphabet, font_size: f32) -> f32 {
        font_size * LINE_HEIGHT_RATIO
    }

    /// Size of the box holding `text`: widest line by line count
    fn measure(&self, text: &str, alphabet: Alphabet, font_size: f32) -> BoxSize {
        let widest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let lines = text.lines().count().max(1);
        BoxSize::new(
            widest as f32 * self.char_width(alphabet, font_size),
            lines as f32 * self.line_height(alphabet, font_size),
        )
    }
}

/// Uses one average advance per script
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageCharWidth;

impl TextMetrics for AverageCharWidth {
    fn char_width(&self, alphabet: Alphabet, font_size: f32) -> f32 {
        let ratio = match alphabet {
            Alphabet::Roman => LATIN_CHAR_WIDTH_RATIO,
            Alphabet::Arabic | Alphabet::Thai => COMPLEX_SCRIPT_CHAR_WIDTH_RATIO,
            Alphabet::Japanese | Alphabet::Korean | Alphabet::Chinese => CJK_CHAR_WIDTH_RATIO,
        };
        font_size * ratio
    }
}
