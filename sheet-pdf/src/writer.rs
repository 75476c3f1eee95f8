use std::io::{self, Write};

use crate::objects::{ObjId, PdfObject};

/// Low-level PDF serializer. Writes indirect objects to any `Write`
/// target and remembers where each one starts for the xref table.
pub struct PdfWriter<W: Write> {
    writer: W,
    offset: usize,
    /// Byte offset of each object, indexed by object number.
    offsets: Vec<Option<usize>>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        PdfWriter {
            writer,
            offset: 0,
            offsets: Vec::new(),
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

    /// Write the PDF 1.7 header followed by the binary marker comment.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_str("%PDF-1.7\n")?;
        self.write_bytes(b"%\xe2\xe3\xcf\xd3\n")
    }

    /// Write an indirect object and record its offset.
    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        let slot = id.0 as usize;
        if self.offsets.len() <= slot {
            self.offsets.resize(slot + 1, None);
        }
        self.offsets[slot] = Some(self.offset);

        self.write_str(&format!("{} {} obj\n", id.0, id.1))?;
        self.write_value(obj)?;
        self.write_str("\nendobj\n")
    }

    fn write_value(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => self.write_str(&n.to_string()),
            PdfObject::Real(f) => self.write_str(&format_number(*f)),
            PdfObject::Name(name) => {
                self.write_str("/")?;
                self.write_str(name)
            }
            PdfObject::LiteralString(s) => {
                self.write_str("(")?;
                self.write_str(&escape_pdf_string(s))?;
                self.write_str(")")
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
            self.write_str(" /")?;
            self.write_str(key)?;
            self.write_str(" ")?;
            self.write_value(val)?;
        }
        Ok(())
    }

    /// Bytes written so far.
    pub fn current_offset(&self) -> usize {
        self.offset
    }

    /// Write the xref table, trailer, startxref and `%%EOF`.
    pub fn write_xref_and_trailer(
        &mut self,
        root_id: ObjId,
        info_id: Option<ObjId>,
    ) -> io::Result<()> {
        let xref_offset = self.offset;
        let size = self.offsets.len().max(1);

        self.write_str(&format!("xref\n0 {}\n", size))?;
        // Object 0 heads the free list. Every entry is exactly 20 bytes.
        self.write_bytes(b"0000000000 65535 f\r\n")?;
        for obj_num in 1..size {
            let entry = match self.offsets[obj_num] {
                Some(off) => format!("{:010} 00000 n\r\n", off),
                None => "0000000000 00000 f\r\n".to_string(),
            };
            self.write_str(&entry)?;
        }

        self.write_str(&format!(
            "trailer\n<< /Size {} /Root {} {} R",
            size, root_id.0, root_id.1,
        ))?;
        if let Some(info) = info_id {
            self.write_str(&format!(" /Info {} {} R", info.0, info.1))?;
        }
        self.write_str(" >>\n")?;
        self.write_str(&format!("startxref\n{}\n%%EOF\n", xref_offset))?;
        self.writer.flush()
    }

    /// Return the inner writer, consuming this PdfWriter.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escape backslashes and parentheses in a PDF literal string.
pub fn escape_pdf_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '(' => result.push_str("\\("),
            ')' => result.push_str("\\)"),
            _ => result.push(c),
        }
    }
    result
}

/// Format a number for PDF output: integers without a decimal point,
/// everything else with at most four decimals and no trailing zeros.
pub(crate) fn format_number(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_has_binary_marker() {
        let mut buf = Vec::new();
        let mut w = PdfWriter::new(&mut buf);
        w.write_header().unwrap();
        assert!(buf.starts_with(b"%PDF-1.7\n"));
        assert_eq!(buf[9], b'%');
        assert!(buf[10..14].iter().all(|&b| b >= 128));
    }

    #[test]
    fn offsets_track_bytes_written() {
        let mut buf = Vec::new();
        let mut w = PdfWriter::new(&mut buf);
        w.write_header().unwrap();
        let after_header = w.current_offset();
        w.write_object(ObjId(1, 0), &PdfObject::Integer(42)).unwrap();
        assert_eq!(after_header, 15);
        assert_eq!(w.current_offset(), buf.len());
    }

    #[test]
    fn gaps_become_free_entries() {
        let mut buf = Vec::new();
        let mut w = PdfWriter::new(&mut buf);
        w.write_header().unwrap();
        w.write_object(ObjId(1, 0), &PdfObject::name("Catalog")).unwrap();
        w.write_object(ObjId(3, 0), &PdfObject::name("Other")).unwrap();
        w.write_xref_and_trailer(ObjId(1, 0), None).unwrap();
        let output = String::from_utf8_lossy(&buf);
        assert!(output.contains("xref\n0 4\n"));
        assert_eq!(output.matches("0000000000 00000 f\r\n").count(), 1);
        assert!(output.contains("/Size 4"));
    }

    #[test]
    fn stream_length_matches_data() {
        let mut buf = Vec::new();
        let mut w = PdfWriter::new(&mut buf);
        let obj = PdfObject::stream(vec![], b"0 0 m 9 9 l S".to_vec());
        w.write_object(ObjId(4, 0), &obj).unwrap();
        let output = String::from_utf8_lossy(&buf);
        assert!(output.contains("<< /Length 13 >>\nstream\n0 0 m 9 9 l S\nendstream"));
    }

    #[test]
    fn format_number_values() {
        assert_eq!(format_number(612.0), "612");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(0.72), "0.72");
        assert_eq!(format_number(1.0 / 3.0), "0.3333");
        assert_eq!(format_number(-0.00001), "0");
    }

    #[test]
    fn escape_special_chars() {
        assert_eq!(escape_pdf_string("cards (front)"), "cards \\(front\\)");
        assert_eq!(escape_pdf_string("a\\b"), "a\\\\b");
    }
}
