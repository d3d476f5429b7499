use pdf_core::{BuiltinFont, Color, FontMetrics};

/// The two faces a rendered invoice uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// Standard font backing this face.
    pub fn builtin(&self) -> BuiltinFont {
        match self {
            FontFace::Regular => BuiltinFont::Helvetica,
            FontFace::Bold => BuiltinFont::HelveticaBold,
        }
    }

    /// Advance width of `text` at `size` points.
    pub fn measure(&self, text: &str, size: f64) -> f64 {
        FontMetrics::measure_text(text, self.builtin(), size)
    }
}

/// Text with its baseline starting at (x, y).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub face: FontFace,
    pub size: f64,
    pub color: Color,
}

/// Axis-aligned rectangle with its lower-left corner at (x, y).
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub border_color: Option<Color>,
    pub border_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub thickness: f64,
    pub color: Color,
}

/// One drawing instruction. Later primitives paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text(TextRun),
    Rectangle(Rectangle),
    Line(LineSegment),
}

impl Primitive {
    pub fn text(
        x: f64,
        y: f64,
        text: impl Into<String>,
        face: FontFace,
        size: f64,
        color: Color,
    ) -> Self {
        Primitive::Text(TextRun {
            x,
            y,
            text: text.into(),
            face,
            size,
            color,
        })
    }

    /// Text whose right edge ends at `right`.
    pub fn text_right(
        right: f64,
        y: f64,
        text: impl Into<String>,
        face: FontFace,
        size: f64,
        color: Color,
    ) -> Self {
        let text = text.into();
        let x = right - face.measure(&text, size);
        Primitive::text(x, y, text, face, size, color)
    }

    /// Borderless filled rectangle.
    pub fn filled_rect(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Primitive::Rectangle(Rectangle {
            x,
            y,
            width,
            height,
            fill,
            border_color: None,
            border_width: None,
        })
    }

    pub fn hline(x1: f64, x2: f64, y: f64, thickness: f64, color: Color) -> Self {
        Primitive::Line(LineSegment {
            from: (x1, y),
            to: (x2, y),
            thickness,
            color,
        })
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Primitive::Text(run) => Some(run),
            _ => None,
        }
    }

    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match self {
            Primitive::Rectangle(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineSegment> {
        match self {
            Primitive::Line(line) => Some(line),
            _ => None,
        }
    }
}
