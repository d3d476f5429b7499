use std::io;

use pdf_core::{FontId, PdfDocument};

use crate::layout::PageLayout;
use crate::primitives::{FontFace, LineSegment, Primitive, Rectangle, TextRun};

/// What the layout needs from a page-description backend.
///
/// Layout output reaches bytes only through these calls; the backend's
/// own representation stays private to it.
pub trait DocumentEmitter {
    /// Handle returned by `embed_font` and passed back to `draw_text`.
    type Font: Copy;

    fn add_page(&mut self, width: f64, height: f64) -> io::Result<()>;

    fn embed_font(&mut self, face: FontFace) -> io::Result<Self::Font>;

    fn draw_text(&mut self, run: &TextRun, font: Self::Font) -> io::Result<()>;

    fn draw_rectangle(&mut self, rect: &Rectangle) -> io::Result<()>;

    fn draw_line(&mut self, line: &LineSegment) -> io::Result<()>;

    /// Finish the document and return its bytes.
    fn serialize(self) -> io::Result<Vec<u8>>
    where
        Self: Sized;
}

/// Replay `layout` onto `emitter` in order and serialize the result.
///
/// Both faces are embedded before the page is opened. The first
/// failure aborts the render; nothing partial is returned.
pub fn emit_page<E: DocumentEmitter>(mut emitter: E, layout: &PageLayout) -> io::Result<Vec<u8>> {
    let regular = emitter.embed_font(FontFace::Regular)?;
    let bold = emitter.embed_font(FontFace::Bold)?;
    emitter.add_page(layout.width, layout.height)?;

    for primitive in &layout.primitives {
        match primitive {
            Primitive::Text(run) => {
                let font = match run.face {
                    FontFace::Regular => regular,
                    FontFace::Bold => bold,
                };
                emitter.draw_text(run, font)?;
            }
            Primitive::Rectangle(rect) => emitter.draw_rectangle(rect)?,
            Primitive::Line(line) => emitter.draw_line(line)?,
        }
    }
    emitter.serialize()
}

/// [`DocumentEmitter`] backed by an in-memory `pdf_core` document.
pub struct PdfEmitter {
    doc: PdfDocument<Vec<u8>>,
}

impl PdfEmitter {
    pub fn new(compress: bool) -> io::Result<Self> {
        let mut doc = PdfDocument::new(Vec::new())?;
        doc.set_compression(compress);
        Ok(PdfEmitter { doc })
    }

    /// Add a document info entry such as "Title" or "Creator".
    pub fn with_info(mut self, key: &str, value: &str) -> Self {
        self.doc.set_info(key, value);
        self
    }
}

impl DocumentEmitter for PdfEmitter {
    type Font = FontId;

    fn add_page(&mut self, width: f64, height: f64) -> io::Result<()> {
        self.doc.begin_page(width, height)
    }

    fn embed_font(&mut self, face: FontFace) -> io::Result<FontId> {
        self.doc.embed_font(face.builtin())
    }

    fn draw_text(&mut self, run: &TextRun, font: FontId) -> io::Result<()> {
        self.doc.save_state()?;
        self.doc.set_fill_color(run.color)?;
        self.doc.place_text(&run.text, run.x, run.y, font, run.size)?;
        self.doc.restore_state()
    }

    fn draw_rectangle(&mut self, rect: &Rectangle) -> io::Result<()> {
        self.doc.save_state()?;
        self.doc.set_fill_color(rect.fill)?;
        self.doc.rect(rect.x, rect.y, rect.width, rect.height)?;
        match rect.border_color {
            Some(border) => {
                self.doc.set_stroke_color(border)?;
                self.doc.set_line_width(rect.border_width.unwrap_or(1.0))?;
                self.doc.fill_stroke()?;
            }
            None => self.doc.fill()?,
        }
        self.doc.restore_state()
    }

    fn draw_line(&mut self, line: &LineSegment) -> io::Result<()> {
        self.doc.save_state()?;
        self.doc.set_stroke_color(line.color)?;
        self.doc.set_line_width(line.thickness)?;
        self.doc.move_to(line.from.0, line.from.1)?;
        self.doc.line_to(line.to.0, line.to.1)?;
        self.doc.stroke()?;
        self.doc.restore_state()
    }

    fn serialize(self) -> io::Result<Vec<u8>> {
        self.doc.end_document()
    }
}
