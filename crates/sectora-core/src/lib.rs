pub mod error;
pub mod message;
pub mod model;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{
        ErrorKind, ExportError, ModelError, Result, SearchError, SectoraError, WorkflowError,
    };
    pub use crate::message::{Message, Role, UsageMetadata};
    pub use crate::model::{CallOptions, ChatModel, ChatResult};
}
