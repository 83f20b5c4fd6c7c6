use std::sync::Arc;

use sectora_core::error::Result;
use sectora_export::exporter::Exporter;
use sectora_llm::factory::create_chat_model;
use sectora_report::analyst::Analyst;
use sectora_search::azure::AzureSearchClient;

use crate::config::AppConfig;
use crate::session::SessionStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub analyst: Analyst,
}

impl AppState {
    pub fn new(analyst: Analyst) -> Self {
        Self {
            sessions: SessionStore::new(),
            analyst,
        }
    }

    /// Wire the hosted gateways described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let model = create_chat_model(&config.model)?;
        let search = AzureSearchClient::new(
            config.search.endpoint.clone(),
            config.search.index.clone(),
            config.search.api_key.clone(),
        );
        let exporter = Exporter::new(config.fonts.clone());

        let analyst = Analyst::new(Arc::from(model), Arc::new(search), Arc::new(exporter))
            .with_top_k(config.search_top);
        Ok(Self::new(analyst))
    }
}
