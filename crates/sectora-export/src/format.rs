use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target document encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Word,
    PowerPoint,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [
        ExportFormat::Pdf,
        ExportFormat::Word,
        ExportFormat::PowerPoint,
    ];

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::PowerPoint => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Word => "docx",
            ExportFormat::PowerPoint => "pptx",
        }
    }

    /// Download name for a report: `보고서_<industry>_<keyword>.<ext>`.
    pub fn file_name(&self, industry: &str, keyword: &str) -> String {
        format!("보고서_{industry}_{keyword}.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "PDF"),
            ExportFormat::Word => write!(f, "Word"),
            ExportFormat::PowerPoint => write!(f, "PowerPoint"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "word" | "docx" => Ok(ExportFormat::Word),
            "powerpoint" | "pptx" | "ppt" => Ok(ExportFormat::PowerPoint),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("docx".parse::<ExportFormat>().unwrap(), ExportFormat::Word);
        assert_eq!(
            "PowerPoint".parse::<ExportFormat>().unwrap(),
            ExportFormat::PowerPoint
        );
        assert!("odt".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn file_name_uses_extension() {
        assert_eq!(
            ExportFormat::Word.file_name("배터리", "electric vehicles"),
            "보고서_배터리_electric vehicles.docx"
        );
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&ExportFormat::PowerPoint).unwrap();
        assert_eq!(json, "\"powerpoint\"");
    }
}
