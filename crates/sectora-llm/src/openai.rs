//! OpenAI / Azure OpenAI Chat Completions API integration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sectora_core::error::{ModelError, Result, SectoraError};
use sectora_core::message::{Message, UsageMetadata};
use sectora_core::model::{CallOptions, ChatModel, ChatResult};

use crate::provider::DEFAULT_AZURE_API_VERSION;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

// ---------------------------------------------------------------------------
// Chat Completions request/response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct OpenAIMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    pub choices: Vec<OpenAIChoice>,
    pub usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIError {
    pub error: OpenAIErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIErrorDetail {
    pub message: String,
}

// ---------------------------------------------------------------------------
// OpenAIChatModel
// ---------------------------------------------------------------------------

/// Where requests are sent and how they are authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// api.openai.com with a bearer token.
    OpenAI,
    /// An Azure OpenAI resource; the model id is the deployment name.
    Azure {
        endpoint: String,
        api_version: String,
    },
}

pub struct OpenAIChatModel {
    api_key: String,
    model_id: String,
    target: Target,
    client: reqwest::Client,
}

impl OpenAIChatModel {
    pub fn new(api_key: String, model_id: String) -> Self {
        Self {
            api_key,
            model_id,
            target: Target::OpenAI,
            client: reqwest::Client::new(),
        }
    }

    pub fn azure(api_key: String, endpoint: String, deployment: String) -> Self {
        Self {
            api_key,
            model_id: deployment,
            target: Target::Azure {
                endpoint,
                api_version: DEFAULT_AZURE_API_VERSION.into(),
            },
            client: reqwest::Client::new(),
        }
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        if let Target::Azure { api_version, .. } = &mut self.target {
            *api_version = version.into();
        }
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn endpoint_url(&self) -> String {
        match &self.target {
            Target::OpenAI => OPENAI_CHAT_URL.into(),
            Target::Azure {
                endpoint,
                api_version,
            } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                endpoint.trim_end_matches('/'),
                self.model_id,
                api_version
            ),
        }
    }

    pub fn build_request(&self, messages: &[Message], options: &CallOptions) -> OpenAIRequest {
        let api_messages = messages
            .iter()
            .map(|msg| OpenAIMessage {
                role: msg.role().as_str(),
                content: msg.content().to_string(),
            })
            .collect();

        // Azure routes by deployment in the URL.
        let model = match self.target {
            Target::OpenAI => Some(self.model_id.clone()),
            Target::Azure { .. } => None,
        };

        OpenAIRequest {
            model,
            messages: api_messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        }
    }
}

/// Map a non-success HTTP status to the model error taxonomy.
pub fn classify_failure(
    status: u16,
    body: &str,
    retry_after_secs: Option<u64>,
) -> ModelError {
    let error_msg = serde_json::from_str::<OpenAIError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());
    match status {
        401 | 403 => ModelError::Auth(error_msg),
        429 => ModelError::RateLimited { retry_after_secs },
        _ => ModelError::ApiRequest(format!("HTTP {status}: {error_msg}")),
    }
}

/// Convert a parsed response into a `ChatResult`.
pub fn into_chat_result(api_response: OpenAIResponse) -> ChatResult {
    let text = api_response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    let usage = api_response.usage.map(|u| UsageMetadata {
        input_tokens: u.prompt_tokens,
        output_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    ChatResult {
        message: Message::ai(text),
        usage,
    }
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    async fn generate(&self, messages: &[Message], options: &CallOptions) -> Result<ChatResult> {
        let request_body = self.build_request(messages, options);

        let request = self.client.post(self.endpoint_url()).json(&request_body);
        let request = match self.target {
            Target::OpenAI => request.header("Authorization", format!("Bearer {}", self.api_key)),
            Target::Azure { .. } => request.header("api-key", &self.api_key),
        };

        debug!(model = %self.model_id, messages = messages.len(), "Sending chat completion");

        let response = request
            .send()
            .await
            .map_err(|e| SectoraError::Model(ModelError::ApiRequest(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read response body".into());
            return Err(classify_failure(status.as_u16(), &body, retry_after).into());
        }

        let api_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| SectoraError::Model(ModelError::InvalidResponse(e.to_string())))?;

        Ok(into_chat_result(api_response))
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_model() -> OpenAIChatModel {
        OpenAIChatModel::new("test-key".into(), "gpt-4o-mini".into())
    }

    #[test]
    fn build_request_maps_roles() {
        let model = make_model();
        let messages = vec![
            Message::system("You are helpful"),
            Message::user("Hello"),
            Message::ai("Hi"),
        ];
        let req = model.build_request(&messages, &CallOptions::analyst());
        assert_eq!(req.model.as_deref(), Some("gpt-4o-mini"));
        let roles: Vec<_> = req.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec!["system", "user", "assistant"]);
        assert_eq!(req.max_tokens, Some(2000));
        assert_eq!(req.temperature, Some(0.7));
    }

    #[test]
    fn build_request_omits_unset_options() {
        let model = make_model();
        let req = model.build_request(&[Message::user("x")], &CallOptions::default());
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn azure_request_routes_by_deployment() {
        let model = OpenAIChatModel::azure(
            "key".into(),
            "https://res.openai.azure.com/".into(),
            "gpt-4o".into(),
        );
        assert_eq!(
            model.endpoint_url(),
            "https://res.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-12-01-preview"
        );
        let req = model.build_request(&[Message::user("x")], &CallOptions::default());
        assert!(req.model.is_none());
        assert_eq!(model.model_name(), "gpt-4o");
    }

    #[test]
    fn azure_api_version_override() {
        let model = OpenAIChatModel::azure("k".into(), "https://r".into(), "d".into())
            .with_api_version("2025-01-01-preview");
        assert!(model.endpoint_url().ends_with("api-version=2025-01-01-preview"));
    }

    #[test]
    fn api_version_ignored_for_openai() {
        let model = make_model().with_api_version("2025-01-01-preview");
        assert_eq!(model.target(), &Target::OpenAI);
        assert_eq!(model.endpoint_url(), OPENAI_CHAT_URL);
    }

    #[test]
    fn parse_response_text_and_usage() {
        let json = r#"{
            "choices": [{"message": {"content": "Hello!"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;
        let resp: OpenAIResponse = serde_json::from_str(json).unwrap();
        let result = into_chat_result(resp);
        assert_eq!(result.message.content(), "Hello!");
        assert_eq!(result.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn parse_response_without_choices_is_empty() {
        let resp: OpenAIResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let result = into_chat_result(resp);
        assert!(matches!(
            result.into_text(),
            Err(SectoraError::Model(ModelError::EmptyResponse))
        ));
    }

    #[test]
    fn classify_failure_statuses() {
        let body = r#"{"error": {"message": "Incorrect API key"}}"#;
        assert!(matches!(
            classify_failure(401, body, None),
            ModelError::Auth(msg) if msg == "Incorrect API key"
        ));
        assert!(matches!(
            classify_failure(429, "", Some(12)),
            ModelError::RateLimited {
                retry_after_secs: Some(12)
            }
        ));
        match classify_failure(500, "oops", None) {
            ModelError::ApiRequest(msg) => assert_eq!(msg, "HTTP 500: oops"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
