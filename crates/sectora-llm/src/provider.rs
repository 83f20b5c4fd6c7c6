use serde::{Deserialize, Serialize};

/// Default Azure OpenAI REST API version.
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-12-01-preview";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    OpenAI,
    AzureOpenAI,
}

/// Everything needed to construct a chat model for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub provider: Provider,
    pub api_key: String,
    /// Model id for OpenAI, deployment name for Azure OpenAI.
    pub model: String,
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`. Azure only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

impl ModelSettings {
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: Provider::OpenAI,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: None,
            api_version: None,
        }
    }

    pub fn azure(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        Self {
            provider: Provider::AzureOpenAI,
            api_key: api_key.into(),
            model: deployment.into(),
            endpoint: Some(endpoint.into()),
            api_version: Some(DEFAULT_AZURE_API_VERSION.into()),
        }
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }
}
