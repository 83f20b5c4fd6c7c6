use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use sectora_core::error::{ModelError, Result};
use sectora_core::message::Message;
use sectora_core::model::{CallOptions, ChatModel, ChatResult};

/// One scripted outcome of a `generate` call.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    /// A successful call carrying no text.
    Empty,
    /// A transport failure.
    Fail(String),
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }
}

/// A ChatModel that plays back scripted replies and records every request.
///
/// Replies are consumed in order; once the script runs out the fallback reply
/// (if any) is repeated, otherwise calls fail.
pub struct ScriptedChatModel {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Option<Reply>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedChatModel {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the same text.
    pub fn always(text: impl Into<String>) -> Self {
        Self::new(Vec::new()).with_fallback(Reply::Text(text.into()))
    }

    /// Always fail with a transport error.
    pub fn failing(msg: impl Into<String>) -> Self {
        Self::new(Vec::new()).with_fallback(Reply::Fail(msg.into()))
    }

    pub fn with_fallback(mut self, reply: Reply) -> Self {
        self.fallback = Some(reply);
        self
    }

    /// Queue another reply after the existing ones.
    pub fn push(&self, reply: Reply) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
    }

    /// Message sequences received so far, in call order.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    fn next_reply(&self) -> Option<Reply> {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    async fn generate(&self, messages: &[Message], _options: &CallOptions) -> Result<ChatResult> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(messages.to_vec());

        let text = match self.next_reply() {
            Some(Reply::Text(text)) => text,
            Some(Reply::Empty) => String::new(),
            Some(Reply::Fail(msg)) => return Err(ModelError::ApiRequest(msg).into()),
            None => return Err(ModelError::ApiRequest("no scripted reply left".into()).into()),
        };

        Ok(ChatResult {
            message: Message::ai(text),
            usage: None,
        })
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}
