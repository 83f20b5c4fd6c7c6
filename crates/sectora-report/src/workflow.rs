//! Section-by-section report authoring.
//!
//! The workflow walks the fixed outline in [`SECTIONS`] one model call at a
//! time. A section is recorded only when the model returns non-empty text, so
//! the number of authored sections is always the index of the next section to
//! write. Once every section exists the report can be finalized into a single
//! markdown document, which is then frozen until [`ReportWorkflow::reset`].

use serde::Serialize;
use tracing::info;

use sectora_core::error::{Result, WorkflowError};
use sectora_core::model::{CallOptions, ChatModel};

use crate::prompt;
use crate::sections::{SECTIONS, SectionSpec, TOTAL_SECTIONS};
use crate::types::{ChatTurn, ReportSection, report_title};

/// Where a report stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress,
    AllSectionsAuthored,
    Completed,
}

/// Snapshot of authoring progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub phase: Phase,
    pub authored: usize,
    pub total: usize,
    pub next_section: Option<SectionSpec>,
}

/// What the model needs to know besides the report itself.
#[derive(Debug, Clone, Copy)]
pub struct AuthoringContext<'a> {
    pub industry: &'a str,
    pub history: &'a [ChatTurn],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportWorkflow {
    sections: Vec<ReportSection>,
    final_text: Option<String>,
}

/// `# <title>\n\n` followed by every section, separated by blank lines.
pub fn assemble(industry: &str, sections: &[ReportSection]) -> String {
    let body = sections
        .iter()
        .map(ReportSection::render)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("# {}\n\n{body}", report_title(industry))
}

impl ReportWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next section to author; equal to the number authored.
    pub fn current_section_index(&self) -> usize {
        self.sections.len()
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn is_completed(&self) -> bool {
        self.final_text.is_some()
    }

    pub fn final_text(&self) -> Option<&str> {
        self.final_text.as_deref()
    }

    pub fn next_section(&self) -> Option<&'static SectionSpec> {
        SECTIONS.get(self.current_section_index())
    }

    pub fn phase(&self) -> Phase {
        if self.final_text.is_some() {
            Phase::Completed
        } else if self.sections.is_empty() {
            Phase::NotStarted
        } else if self.sections.len() >= TOTAL_SECTIONS {
            Phase::AllSectionsAuthored
        } else {
            Phase::InProgress
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            phase: self.phase(),
            authored: self.sections.len(),
            total: TOTAL_SECTIONS,
            next_section: self.next_section().copied(),
        }
    }

    /// The report as it would read if finalized now.
    pub fn preview(&self, industry: &str) -> String {
        assemble(industry, &self.sections)
    }

    /// Author the next outline section. On any failure nothing is recorded.
    pub async fn author_next_section(
        &mut self,
        model: &dyn ChatModel,
        options: &CallOptions,
        ctx: AuthoringContext<'_>,
    ) -> Result<&ReportSection> {
        let index = self.current_section_index();
        let Some(spec) = SECTIONS.get(index) else {
            return Err(WorkflowError::AllSectionsAuthored {
                total: TOTAL_SECTIONS,
            }
            .into());
        };

        let messages =
            prompt::section_messages(ctx.industry, ctx.history, &self.sections, index, spec);
        let content = model.complete(&messages, options).await?;

        info!(
            industry = ctx.industry,
            section = index + 1,
            title = spec.title,
            chars = content.chars().count(),
            "Section authored"
        );
        self.sections.push(ReportSection {
            title: spec.title.to_string(),
            content,
        });
        Ok(&self.sections[index])
    }

    /// Rewrite an authored section in place. Title and position are kept.
    pub async fn rewrite_section(
        &mut self,
        index: usize,
        model: &dyn ChatModel,
        options: &CallOptions,
        ctx: AuthoringContext<'_>,
    ) -> Result<&ReportSection> {
        if self.final_text.is_some() {
            return Err(WorkflowError::AlreadyFinalized.into());
        }
        let messages = prompt::rewrite_messages(ctx.industry, ctx.history, &self.sections, index)
            .ok_or(WorkflowError::SectionOutOfRange {
                index,
                len: self.sections.len(),
            })?;
        let content = model.complete(&messages, options).await?;

        let section = &mut self.sections[index];
        info!(
            industry = ctx.industry,
            section = index + 1,
            title = %section.title,
            "Section rewritten"
        );
        section.content = content;
        Ok(&*section)
    }

    /// Assemble and freeze the report. Repeated calls return the frozen text.
    pub fn finalize(&mut self, industry: &str) -> Result<&str> {
        if self.final_text.is_none() {
            let authored = self.sections.len();
            if authored < TOTAL_SECTIONS {
                return Err(WorkflowError::NotReadyToFinalize {
                    authored,
                    total: TOTAL_SECTIONS,
                }
                .into());
            }
            info!(industry, sections = authored, "Report finalized");
        }
        Ok(self
            .final_text
            .get_or_insert_with(|| assemble(industry, &self.sections))
            .as_str())
    }

    pub fn reset(&mut self) {
        self.sections.clear();
        self.final_text = None;
    }
}
