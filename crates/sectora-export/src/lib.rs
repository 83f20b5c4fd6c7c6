pub mod docx;
pub mod exporter;
pub mod format;
pub mod markup;
mod ooxml;
pub mod pdf;
pub mod pptx;

pub mod prelude {
    pub use crate::exporter::{DocumentExporter, ExportOptions, Exporter};
    pub use crate::format::ExportFormat;
    pub use crate::markup::{Line, tokenize};
}
