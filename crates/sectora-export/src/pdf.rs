//! PDF backend.
//!
//! Rendering is split into a layout pass, which places every wrapped line on
//! an A4 page in points, and a drawing pass that hands the placed lines to
//! `printpdf`. The layout pass has no I/O and is what the tests exercise.

use std::fs::File;
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Rgb,
};
use tracing::warn;

use sectora_core::error::ExportError;

use crate::markup::{Line, rendered_lines};

pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;
pub const SIDE_MARGIN_PT: f32 = 72.0;
pub const TOP_MARGIN_PT: f32 = 72.0;
pub const BOTTOM_MARGIN_PT: f32 = 18.0;

const FRAME_WIDTH_PT: f32 = PAGE_WIDTH_PT - 2.0 * SIDE_MARGIN_PT;
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Spacer after the title block (0.5in).
const TITLE_SPACER_PT: f32 = 36.0;
/// Spacer before every heading (0.3in).
const HEADING_SPACER_PT: f32 = 21.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Heading,
    Body,
}

impl TextStyle {
    pub fn size(self) -> f32 {
        match self {
            TextStyle::Title => 24.0,
            TextStyle::Heading => 16.0,
            TextStyle::Body => 11.0,
        }
    }

    fn leading(self) -> f32 {
        match self {
            TextStyle::Title => 30.0,
            TextStyle::Heading => 20.0,
            TextStyle::Body => 18.0,
        }
    }

    fn space_before(self) -> f32 {
        match self {
            TextStyle::Heading => 20.0,
            _ => 0.0,
        }
    }

    fn space_after(self) -> f32 {
        match self {
            TextStyle::Title => 30.0,
            TextStyle::Heading | TextStyle::Body => 12.0,
        }
    }
}

/// A single wrapped line with its position. Coordinates are points measured
/// from the top-left corner of its page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub page: usize,
    pub style: TextStyle,
    pub x: f32,
    pub baseline: f32,
    pub text: String,
}

/// Approximate advance width in ems. Hangul and CJK ideographs are full width.
fn char_em(c: char) -> f32 {
    match c {
        ' ' => 0.28,
        '\u{1100}'..='\u{11FF}'
        | '\u{2E80}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FF00}'..='\u{FFEF}' => 1.0,
        c if c.is_ascii_uppercase() => 0.67,
        _ => 0.5,
    }
}

pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(char_em).sum::<f32>() * size
}

/// Greedy wrap to `max_width` points, breaking at the last space when the
/// line has one and anywhere otherwise.
pub fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;

    for c in text.chars() {
        let w = char_em(c) * size;
        let mut broke = false;
        // The carried-over word plus `c` may still overflow; break again.
        while width + w > max_width && !current.is_empty() {
            let (line, rest) = match current.rfind(' ') {
                Some(pos) if pos > 0 => (current[..pos].to_string(), current[pos + 1..].to_string()),
                _ => (std::mem::take(&mut current), String::new()),
            };
            if !line.trim().is_empty() {
                lines.push(line.trim_end().to_string());
            }
            current = rest;
            width = text_width(&current, size);
            broke = true;
        }
        if broke && current.is_empty() && c == ' ' {
            continue;
        }
        current.push(c);
        width += w;
    }
    if !current.trim().is_empty() {
        lines.push(current.trim_end().to_string());
    }
    lines
}

struct Flow {
    page: usize,
    y: f32,
    placed: Vec<PlacedLine>,
}

impl Flow {
    fn new() -> Self {
        Self {
            page: 0,
            y: TOP_MARGIN_PT,
            placed: Vec::new(),
        }
    }

    // Vertical space is discarded at the top of a page.
    fn space(&mut self, pt: f32) {
        if self.y > TOP_MARGIN_PT {
            self.y += pt;
        }
    }

    fn line(&mut self, style: TextStyle, text: String) {
        if self.y + style.leading() > PAGE_HEIGHT_PT - BOTTOM_MARGIN_PT {
            self.page += 1;
            self.y = TOP_MARGIN_PT;
        }
        let x = match style {
            TextStyle::Title => {
                ((PAGE_WIDTH_PT - text_width(&text, style.size())) / 2.0).max(SIDE_MARGIN_PT)
            }
            _ => SIDE_MARGIN_PT,
        };
        self.placed.push(PlacedLine {
            page: self.page,
            style,
            x,
            baseline: self.y + style.size(),
            text,
        });
        self.y += style.leading();
    }

    fn paragraph(&mut self, style: TextStyle, text: &str) {
        self.space(style.space_before());
        for line in wrap(text, style.size(), FRAME_WIDTH_PT) {
            self.line(style, line);
        }
        self.space(style.space_after());
    }
}

/// Place the title and every rendered line of `body`.
pub fn layout(title: &str, body: &str) -> Vec<PlacedLine> {
    let mut flow = Flow::new();
    flow.paragraph(TextStyle::Title, title);
    flow.space(TITLE_SPACER_PT);

    for line in rendered_lines(body) {
        match line {
            Line::Heading(text) => {
                flow.space(HEADING_SPACER_PT);
                flow.paragraph(TextStyle::Heading, text);
            }
            Line::Body(text) => flow.paragraph(TextStyle::Body, text),
            Line::Blank | Line::Title(_) => {}
        }
    }
    flow.placed
}

/// TrueType faces to embed. Both are optional; a missing or unreadable
/// regular face selects the built-in Helvetica pair.
#[derive(Debug, Clone, Default)]
pub struct PdfFonts {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
}

struct Faces {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    builtin: bool,
}

impl Faces {
    fn for_style(&self, style: TextStyle) -> &IndirectFontRef {
        match style {
            TextStyle::Body => &self.regular,
            TextStyle::Title | TextStyle::Heading => &self.bold,
        }
    }

    // Built-in fonts only cover Latin-1.
    fn prepare(&self, text: &str) -> String {
        if !self.builtin {
            return text.to_string();
        }
        text.chars()
            .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
            .collect()
    }
}

fn load_external(doc: &PdfDocumentReference, path: &Path) -> Result<IndirectFontRef, ExportError> {
    let file = File::open(path).map_err(|e| ExportError::Font(format!("{}: {e}", path.display())))?;
    doc.add_external_font(file)
        .map_err(|e| ExportError::Font(format!("{}: {e}", path.display())))
}

fn load_faces(doc: &PdfDocumentReference, fonts: &PdfFonts) -> Result<Faces, ExportError> {
    let regular = match fonts.regular.as_deref() {
        Some(path) => match load_external(doc, path) {
            Ok(font) => Some(font),
            Err(e) => {
                warn!(error = %e, "PDF font unavailable, falling back to Helvetica");
                None
            }
        },
        None => None,
    };

    match regular {
        Some(regular) => {
            let bold = match fonts.bold.as_deref().map(|p| load_external(doc, p)) {
                Some(Ok(bold)) => bold,
                Some(Err(e)) => {
                    warn!(error = %e, "Bold PDF font unavailable, using regular face");
                    regular.clone()
                }
                None => regular.clone(),
            };
            Ok(Faces {
                regular,
                bold,
                builtin: false,
            })
        }
        None => {
            let builtin = |font| {
                doc.add_builtin_font(font)
                    .map_err(|e| ExportError::Font(e.to_string()))
            };
            Ok(Faces {
                regular: builtin(BuiltinFont::Helvetica)?,
                bold: builtin(BuiltinFont::HelveticaBold)?,
                builtin: true,
            })
        }
    }
}

fn mm(pt: f32) -> Mm {
    Mm(pt * MM_PER_PT)
}

fn colour(style: TextStyle) -> Color {
    match style {
        TextStyle::Title => Color::Rgb(Rgb::new(0.0, 0.0, 1.0, None)),
        _ => Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)),
    }
}

/// Render an A4 PDF.
pub fn render(title: &str, body: &str, fonts: &PdfFonts) -> Result<Vec<u8>, ExportError> {
    let placed = layout(title, body);

    let (doc, page, layer) = PdfDocument::new(
        title,
        mm(PAGE_WIDTH_PT),
        mm(PAGE_HEIGHT_PT),
        "Layer 1",
    );
    let faces = load_faces(&doc, fonts)?;

    let mut layers: Vec<PdfLayerReference> = vec![doc.get_page(page).get_layer(layer)];
    for line in &placed {
        while layers.len() <= line.page {
            let (page, layer) = doc.add_page(mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), "Layer 1");
            layers.push(doc.get_page(page).get_layer(layer));
        }
        let current = &layers[line.page];
        current.set_fill_color(colour(line.style));
        current.use_text(
            faces.prepare(&line.text),
            line.style.size(),
            mm(line.x),
            mm(PAGE_HEIGHT_PT - line.baseline),
            faces.for_style(line.style),
        );
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::render("pdf", e))
}
