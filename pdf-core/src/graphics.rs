use crate::document::format_coord;

/// RGB color for fill and stroke operators.
///
/// Components run from 0.0 (none) to 1.0 (full intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    /// Create a color from RGB components (each 0.0 to 1.0).
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Create a grayscale color (r = g = b = level).
    pub const fn gray(level: f64) -> Self {
        Color {
            r: level,
            g: level,
            b: level,
        }
    }

    /// The three operands shared by the `rg` and `RG` operators.
    pub(crate) fn operands(&self) -> String {
        format!(
            "{} {} {}",
            format_coord(self.r),
            format_coord(self.g),
            format_coord(self.b)
        )
    }
}
