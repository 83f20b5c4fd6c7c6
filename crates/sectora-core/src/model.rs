use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::message::{Message, UsageMetadata};

/// Options controlling a ChatModel invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallOptions {
    /// Maximum tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 - 2.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl CallOptions {
    /// Sampling settings used for every analyst call.
    pub fn analyst() -> Self {
        Self {
            max_tokens: Some(2000),
            temperature: Some(0.7),
        }
    }
}

/// Result of a chat model generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResult {
    /// The generated message.
    pub message: Message,

    /// Token usage metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetadata>,
}

impl ChatResult {
    /// The generated text, or `ModelError::EmptyResponse` when there is none.
    pub fn into_text(self) -> Result<String> {
        let text = match self.message {
            Message::AI { content } => content,
            other => other.content().to_string(),
        };
        if text.is_empty() {
            return Err(ModelError::EmptyResponse.into());
        }
        Ok(text)
    }
}

/// Trait for chat language models.
///
/// Implementations handle API communication, request formatting and response
/// parsing for one hosted model provider.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a response for the given messages.
    async fn generate(&self, messages: &[Message], options: &CallOptions) -> Result<ChatResult>;

    /// Return the model name/identifier.
    fn model_name(&self) -> &str;

    /// Generate and return non-empty text.
    async fn complete(&self, messages: &[Message], options: &CallOptions) -> Result<String> {
        self.generate(messages, options).await?.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SectoraError;

    struct FixedModel {
        response: String,
    }

    #[async_trait]
    impl ChatModel for FixedModel {
        async fn generate(
            &self,
            _messages: &[Message],
            _options: &CallOptions,
        ) -> Result<ChatResult> {
            Ok(ChatResult {
                message: Message::ai(self.response.clone()),
                usage: Some(UsageMetadata {
                    input_tokens: 10,
                    output_tokens: 5,
                    total_tokens: 15,
                }),
            })
        }

        fn model_name(&self) -> &str {
            "fixed-model"
        }
    }

    #[tokio::test]
    async fn complete_returns_text() {
        let model = FixedModel {
            response: "Hello!".into(),
        };
        let text = model
            .complete(&[Message::user("Hi")], &CallOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "Hello!");
        assert_eq!(model.model_name(), "fixed-model");
    }

    #[tokio::test]
    async fn complete_treats_empty_text_as_empty_response() {
        let model = FixedModel {
            response: String::new(),
        };
        let err = model
            .complete(&[Message::user("Hi")], &CallOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SectoraError::Model(ModelError::EmptyResponse)));
    }

    #[tokio::test]
    async fn complete_keeps_whitespace_only_text() {
        let model = FixedModel {
            response: "  \n ".into(),
        };
        let text = model
            .complete(&[Message::user("Hi")], &CallOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "  \n ");
    }

    #[test]
    fn analyst_options() {
        let opts = CallOptions::analyst();
        assert_eq!(opts.max_tokens, Some(2000));
        assert_eq!(opts.temperature, Some(0.7));
        assert_eq!(CallOptions::default().max_tokens, None);
    }

    #[test]
    fn call_options_skip_unset_fields() {
        let json = serde_json::to_string(&CallOptions::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
