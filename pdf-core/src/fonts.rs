use crate::writer::win_ansi_code;

/// Handle to a font embedded in a `PdfDocument`.
///
/// Handles are assigned in embedding order; the page resource name is
/// derived from the index (`FontId(0)` is `/F1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(pub usize);

impl FontId {
    /// Resource name used in content streams (e.g. "F1").
    pub fn resource_name(&self) -> String {
        format!("F{}", self.0 + 1)
    }
}

/// Standard PDF Type1 faces available without font files.
///
/// Only the regular and bold Helvetica faces are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFont {
    /// Returns the PDF BaseFont name.
    pub fn pdf_base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// Helvetica widths for ASCII 32..=126, in 1/1000 em.
/// Source: Adobe Helvetica AFM data.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold widths for ASCII 32..=126, in 1/1000 em.
/// Source: Adobe Helvetica-Bold AFM data.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Helvetica widths for WinAnsi codes 0xA0..=0xFF, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Helvetica-Bold widths for WinAnsi codes 0xA0..=0xFF, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_BOLD_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Glyph metrics for the builtin faces.
///
/// Widths are those of the glyph the document actually draws: characters
/// are measured by their WinAnsi code, and characters with no code are
/// measured as the `?` that replaces them.
pub struct FontMetrics;

impl FontMetrics {
    /// Advance width of `ch` in 1/1000 em units.
    pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
        let code = match ch {
            ' '..='~' => ch as u8,
            // Control characters have no glyph.
            '\0'..='\u{1f}' => return 0,
            _ => win_ansi_code(ch).unwrap_or(b'?'),
        };
        Self::code_width(font, code)
    }

    fn code_width(font: BuiltinFont, code: u8) -> u16 {
        let bold = font == BuiltinFont::HelveticaBold;
        match code {
            32..=126 if bold => HELVETICA_BOLD_WIDTHS[(code - 32) as usize],
            32..=126 => HELVETICA_WIDTHS[(code - 32) as usize],
            0xA0..=0xFF if bold => HELVETICA_BOLD_LATIN1_WIDTHS[(code - 0xA0) as usize],
            0xA0..=0xFF => HELVETICA_LATIN1_WIDTHS[(code - 0xA0) as usize],
            // Euro, en dash
            0x80 | 0x96 => 556,
            0x91 | 0x92 if bold => 278,
            0x91 | 0x92 => 222,
            0x93 | 0x94 if bold => 500,
            0x93 | 0x94 => 333,
            0x95 => 350,
            0x97 => 1000,
            _ => Self::code_width(font, b'?'),
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn measure_text(text: &str, font: BuiltinFont, font_size: f64) -> f64 {
        let total: u32 = text
            .chars()
            .map(|ch| Self::char_width(font, ch) as u32)
            .sum();
        total as f64 * font_size / 1000.0
    }
}
