//! Shared plumbing for Office Open XML packages (docx, pptx).

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use sectora_core::error::ExportError;

pub(crate) const XML_HEADER: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// An in-memory zip package. Parts are added in order; `finish` yields the
/// bytes only if every part was written.
pub(crate) struct Package {
    format: &'static str,
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl Package {
    pub(crate) fn new(format: &'static str) -> Self {
        Self {
            format,
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    pub(crate) fn part(&mut self, path: &str, xml: &str) -> Result<(), ExportError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.zip
            .start_file(path, options)
            .map_err(|e| ExportError::render(self.format, e))?;
        self.zip
            .write_all(xml.as_bytes())
            .map_err(|e| ExportError::render(self.format, e))
    }

    pub(crate) fn finish(self) -> Result<Vec<u8>, ExportError> {
        let format = self.format;
        self.zip
            .finish()
            .map(Cursor::into_inner)
            .map_err(|e| ExportError::render(format, e))
    }
}

/// Escape text for XML element content and attribute values. Characters not
/// allowed in XML 1.0 are dropped.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}
