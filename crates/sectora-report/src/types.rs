use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One question/answer exchange about the selected industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        }
    }
}

/// An authored report section. The title always matches the section outline
/// entry at the same position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub content: String,
}

impl ReportSection {
    /// `## <title>\n<content>`
    pub fn render(&self) -> String {
        format!("## {}\n{}", self.title, self.content)
    }
}

/// Title shared by the finished report and its exported documents.
pub fn report_title(industry: &str) -> String {
    format!("{industry} 시장 분석 및 사업 제안 보고서")
}
