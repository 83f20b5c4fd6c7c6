pub mod analyst;
pub mod prompt;
pub mod recommend;
pub mod sections;
pub mod session;
pub mod types;
pub mod workflow;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analyst::{Analyst, ExportedReport};
    pub use crate::recommend::{MAX_RECOMMENDATIONS, extract_recommendations};
    pub use crate::sections::{SECTIONS, SectionSpec, TOTAL_SECTIONS};
    pub use crate::session::SessionState;
    pub use crate::types::{ChatTurn, ReportSection, report_title};
    pub use crate::workflow::{AuthoringContext, Phase, Progress, ReportWorkflow};
}
