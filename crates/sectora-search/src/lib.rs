pub mod azure;
pub mod gateway;
pub mod memory;
pub mod types;

pub mod prelude {
    pub use crate::azure::AzureSearchClient;
    pub use crate::gateway::SearchGateway;
    pub use crate::memory::InMemorySearchIndex;
    pub use crate::types::{DEFAULT_TOP_K, SearchResult};
}
