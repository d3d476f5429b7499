use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::objects::{ObjId, PdfObject};

/// Serializes PDF objects to a `Write` target, remembering the byte
/// offset of every indirect object for the cross-reference table.
pub struct PdfWriter<W: Write> {
    writer: W,
    offset: usize,
    xref: BTreeMap<u32, usize>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        PdfWriter {
            writer,
            offset: 0,
            xref: BTreeMap::new(),
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Write the `%PDF-1.7` header followed by a binary marker comment.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_str("%PDF-1.7\n")?;
        // Four bytes >= 128 so transfer tools treat the file as binary.
        self.write_bytes(b"%\xe2\xe3\xcf\xd3\n")
    }

    /// Write `obj` as indirect object `id`.
    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        self.xref.insert(id.0, self.offset);
        self.write_str(&format!("{} {} obj\n", id.0, id.1))?;
        self.write_value(obj)?;
        self.write_str("\nendobj\n")
    }

    fn write_value(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => self.write_str(&n.to_string()),
            PdfObject::Real(f) => self.write_str(&format_real(*f)),
            PdfObject::Name(name) => self.write_str(&format!("/{}", name)),
            PdfObject::LiteralString(s) => {
                self.write_str(&format!("({})", escape_pdf_string(s)))
            }
            PdfObject::Array(items) => {
                self.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.write_str(" ")?;
                    }
                    self.write_value(item)?;
                }
                self.write_str("]")
            }
            PdfObject::Dictionary(entries) => {
                self.write_str("<<")?;
                self.write_entries(entries)?;
                self.write_str(" >>")
            }
            PdfObject::Stream { dict, data } => {
                self.write_str("<<")?;
                self.write_entries(dict)?;
                self.write_str(&format!(" /Length {} >>\nstream\n", data.len()))?;
                self.write_bytes(data)?;
                self.write_str("\nendstream")
            }
            PdfObject::Reference(id) => self.write_str(&format!("{} {} R", id.0, id.1)),
        }
    }

    fn write_entries(&mut self, entries: &[(String, PdfObject)]) -> io::Result<()> {
        for (key, val) in entries {
            self.write_str(&format!(" /{} ", key))?;
            self.write_value(val)?;
        }
        Ok(())
    }

    /// Write the xref table, trailer, `startxref` and `%%EOF`.
    ///
    /// Object numbers with no recorded object become free entries.
    pub fn write_xref_and_trailer(&mut self, root: ObjId, info: Option<ObjId>) -> io::Result<()> {
        let xref_offset = self.offset;
        let size = self.xref.keys().next_back().map_or(1, |&max| max + 1);

        let mut table = format!("xref\n0 {}\n", size);
        // Every entry is exactly 20 bytes, including the CRLF.
        table.push_str("0000000000 65535 f\r\n");
        for num in 1..size {
            match self.xref.get(&num) {
                Some(off) => table.push_str(&format!("{:010} 00000 n\r\n", off)),
                None => table.push_str("0000000000 00000 f\r\n"),
            }
        }
        self.write_str(&table)?;

        let mut trailer = format!("trailer\n<< /Size {} /Root {} {} R", size, root.0, root.1);
        if let Some(info) = info {
            trailer.push_str(&format!(" /Info {} {} R", info.0, info.1));
        }
        trailer.push_str(&format!(" >>\nstartxref\n{}\n%%EOF\n", xref_offset));
        self.write_str(&trailer)
    }

    /// Consume the writer and return the underlying target.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escape a string for a PDF literal string in WinAnsiEncoding.
///
/// Delimiters and backslashes are escaped, Latin-1 and the common
/// typographic punctuation become octal escapes, and characters the
/// encoding cannot represent are replaced with `?`.
pub fn escape_pdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            _ => match win_ansi_code(c) {
                Some(code) => out.push_str(&format!("\\{:03o}", code)),
                None => out.push('?'),
            },
        }
    }
    out
}

/// WinAnsiEncoding byte for a non-ASCII character, if it has one.
pub(crate) fn win_ansi_code(c: char) -> Option<u8> {
    match c {
        '\u{00A0}'..='\u{00FF}' => Some(c as u32 as u8),
        '€' => Some(0x80),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        _ => None,
    }
}

/// Format a real for object output: integral values keep one decimal,
/// others drop trailing zeros; never scientific notation.
fn format_real(f: f64) -> String {
    if f == f.floor() && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        let s = format!("{:.6}", f);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_real_values() {
        assert_eq!(format_real(595.0), "595.0");
        assert_eq!(format_real(595.28), "595.28");
        assert_eq!(format_real(841.89), "841.89");
        assert_eq!(format_real(0.0), "0.0");
    }

    #[test]
    fn win_ansi_covers_latin1_and_quotes() {
        assert_eq!(win_ansi_code('é'), Some(0xE9));
        assert_eq!(win_ansi_code('’'), Some(0x92));
        assert_eq!(win_ansi_code('日'), None);
    }
}
