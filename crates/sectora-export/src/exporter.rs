use std::path::PathBuf;

use tracing::info;

use sectora_core::error::Result;

use crate::format::ExportFormat;
use crate::pdf::PdfFonts;
use crate::{docx, pdf, pptx};

/// Renders a finished report into a downloadable document.
pub trait DocumentExporter: Send + Sync {
    fn render(&self, format: ExportFormat, title: &str, body: &str) -> Result<Vec<u8>>;
}

/// Font files for the PDF backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub pdf_font: Option<PathBuf>,
    pub pdf_font_bold: Option<PathBuf>,
}

/// The built-in exporter covering every [`ExportFormat`].
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    fonts: PdfFonts,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self {
            fonts: PdfFonts {
                regular: options.pdf_font,
                bold: options.pdf_font_bold,
            },
        }
    }
}

impl DocumentExporter for Exporter {
    fn render(&self, format: ExportFormat, title: &str, body: &str) -> Result<Vec<u8>> {
        let bytes = match format {
            ExportFormat::Pdf => pdf::render(title, body, &self.fonts)?,
            ExportFormat::Word => docx::render(title, body)?,
            ExportFormat::PowerPoint => pptx::render(title, body)?,
        };
        info!(%format, bytes = bytes.len(), "Rendered report");
        Ok(bytes)
    }
}
