use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::fonts::{BuiltinFont, FontId};
use crate::graphics::Color;
use crate::objects::{ObjId, PdfObject};
use crate::writer::{escape_pdf_string, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FIRST_FREE_OBJ_NUM: u32 = 3;

/// High-level builder for PDF documents.
///
/// Generic over `Write`: in-memory buffers (`Vec<u8>`), files or any
/// other writer.
///
/// Fonts are written as soon as they are embedded and pages as soon
/// as they end, so only the open page's content is held in memory.
/// Nothing time- or randomness-dependent is written: identical calls
/// produce identical bytes.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    fonts: Vec<(BuiltinFont, ObjId)>,
    page_obj_ids: Vec<ObjId>,
    current_page: Option<PageBuilder>,
    next_obj_num: u32,
    compress: bool,
}

struct PageBuilder {
    width: f64,
    height: f64,
    content_ops: Vec<u8>,
}

impl<W: Write> PdfDocument<W> {
    /// Create a document writing to `writer`. The header is written
    /// immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;
        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            fonts: Vec::new(),
            page_obj_ids: Vec::new(),
            current_page: None,
            next_obj_num: FIRST_FREE_OBJ_NUM,
            compress: false,
        })
    }

    /// Set a document info entry (e.g. "Creator", "Title").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Flate-compress page content streams written from now on.
    pub fn set_compression(&mut self, compress: bool) -> &mut Self {
        self.compress = compress;
        self
    }

    fn alloc_obj(&mut self) -> ObjId {
        let id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        id
    }

    /// Embed a standard font and return its handle. Embedding the same
    /// face twice returns the first handle.
    ///
    /// Pages reference every font embedded before they end, so embed
    /// fonts before drawing.
    pub fn embed_font(&mut self, font: BuiltinFont) -> io::Result<FontId> {
        if let Some(index) = self.fonts.iter().position(|(f, _)| *f == font) {
            return Ok(FontId(index));
        }
        let id = self.alloc_obj();
        let dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Font")),
            ("Subtype", PdfObject::name("Type1")),
            ("BaseFont", PdfObject::name(font.pdf_base_name())),
            ("Encoding", PdfObject::name("WinAnsiEncoding")),
        ]);
        self.writer.write_object(id, &dict)?;
        self.fonts.push((font, id));
        Ok(FontId(self.fonts.len() - 1))
    }

    /// Begin a new page with the given dimensions in points.
    /// An open page is ended first.
    pub fn begin_page(&mut self, width: f64, height: f64) -> io::Result<()> {
        if self.current_page.is_some() {
            self.end_page()?;
        }
        self.current_page = Some(PageBuilder {
            width,
            height,
            content_ops: Vec::new(),
        });
        Ok(())
    }

    fn push_ops(&mut self, ops: &str) -> io::Result<()> {
        let page = self.current_page.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "no open page")
        })?;
        page.content_ops.extend_from_slice(ops.as_bytes());
        Ok(())
    }

    /// Place `text` with its baseline starting at (x, y), in the
    /// embedded `font` at `size` points. Uses the current fill color.
    /// Coordinates use PDF's bottom-left origin.
    pub fn place_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: FontId,
        size: f64,
    ) -> io::Result<()> {
        if font.0 >= self.fonts.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("font {} was not embedded", font.resource_name()),
            ));
        }
        self.push_ops(&format!(
            "BT\n/{} {} Tf\n{} {} Td\n({}) Tj\nET\n",
            font.resource_name(),
            format_coord(size),
            format_coord(x),
            format_coord(y),
            escape_pdf_string(text),
        ))
    }

    /// Push the graphics state (`q`).
    pub fn save_state(&mut self) -> io::Result<()> {
        self.push_ops("q\n")
    }

    /// Pop the graphics state (`Q`).
    pub fn restore_state(&mut self) -> io::Result<()> {
        self.push_ops("Q\n")
    }

    /// Set the non-stroking color used by fills and text.
    pub fn set_fill_color(&mut self, color: Color) -> io::Result<()> {
        self.push_ops(&format!("{} rg\n", color.operands()))
    }

    /// Set the stroking color used by lines and borders.
    pub fn set_stroke_color(&mut self, color: Color) -> io::Result<()> {
        self.push_ops(&format!("{} RG\n", color.operands()))
    }

    pub fn set_line_width(&mut self, width: f64) -> io::Result<()> {
        self.push_ops(&format!("{} w\n", format_coord(width)))
    }

    /// Append a rectangle subpath with its lower-left corner at (x, y).
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> io::Result<()> {
        self.push_ops(&format!(
            "{} {} {} {} re\n",
            format_coord(x),
            format_coord(y),
            format_coord(width),
            format_coord(height),
        ))
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> io::Result<()> {
        self.push_ops(&format!("{} {} m\n", format_coord(x), format_coord(y)))
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> io::Result<()> {
        self.push_ops(&format!("{} {} l\n", format_coord(x), format_coord(y)))
    }

    pub fn fill(&mut self) -> io::Result<()> {
        self.push_ops("f\n")
    }

    pub fn stroke(&mut self) -> io::Result<()> {
        self.push_ops("S\n")
    }

    pub fn fill_stroke(&mut self) -> io::Result<()> {
        self.push_ops("B\n")
    }

    /// End the current page: write its content stream and page
    /// dictionary, then drop the buffered content.
    pub fn end_page(&mut self) -> io::Result<()> {
        let page = self.current_page.take().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "end_page called with no open page")
        })?;

        let content_id = self.alloc_obj();
        let page_id = self.alloc_obj();

        let content_stream = if self.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&page.content_ops)?;
            PdfObject::stream(
                vec![("Filter", PdfObject::name("FlateDecode"))],
                encoder.finish()?,
            )
        } else {
            PdfObject::stream(vec![], page.content_ops)
        };
        self.writer.write_object(content_id, &content_stream)?;

        let font_resources = self
            .fonts
            .iter()
            .enumerate()
            .map(|(index, (_, obj))| (FontId(index).resource_name(), PdfObject::reference(*obj)))
            .collect();
        let page_dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::reference(PAGES_OBJ)),
            ("MediaBox", PdfObject::rect(0.0, 0.0, page.width, page.height)),
            ("Contents", PdfObject::reference(content_id)),
            (
                "Resources",
                PdfObject::dict(vec![("Font", PdfObject::Dictionary(font_resources))]),
            ),
        ]);
        self.writer.write_object(page_id, &page_dict)?;

        self.page_obj_ids.push(page_id);
        Ok(())
    }

    /// Finish the document: info dictionary, pages tree, catalog, xref
    /// and trailer. Returns the underlying writer.
    pub fn end_document(mut self) -> io::Result<W> {
        if self.current_page.is_some() {
            self.end_page()?;
        }

        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = self.alloc_obj();
            let entries = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            self.writer.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        let kids = self
            .page_obj_ids
            .iter()
            .map(|id| PdfObject::reference(*id))
            .collect();
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::array(kids)),
            ("Count", PdfObject::Integer(self.page_obj_ids.len() as i64)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        let mut inner = self.writer.into_inner();
        inner.flush()?;
        Ok(inner)
    }
}

/// Format a number for content streams: integers without a decimal
/// point, fractions with at most four digits.
pub(crate) fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" {
            "0".to_string()
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_coord_values() {
        assert_eq!(format_coord(50.0), "50");
        assert_eq!(format_coord(761.89), "761.89");
        assert_eq!(format_coord(0.12345), "0.1235");
        assert_eq!(format_coord(-0.00001), "0");
    }
}
