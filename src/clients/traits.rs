use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Request body accepted by a completion service: a model id and a message list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Single system-role message, the only shape the analyzer sends.
    pub fn system(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: Role::System,
                content: prompt.into(),
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl CompletionResponse {
    /// Response carrying a single choice with the given content.
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: Some(ChoiceMessage {
                    content: Some(content.into()),
                }),
            }],
        }
    }

    /// Content of `choices[0].message`. Later choices are ignored.
    pub fn first_content(&self) -> Result<&str, CompletionError> {
        let choice = self.choices.first().ok_or_else(|| {
            CompletionError::EmptyResponse("completion response contained no choices".into())
        })?;
        choice
            .message
            .as_ref()
            .and_then(|m| m.content.as_deref())
            .ok_or_else(|| {
                CompletionError::EmptyResponse(
                    "completion response contained no message content".into(),
                )
            })
    }

    pub fn into_first_content(self) -> Result<String, CompletionError> {
        self.first_content().map(str::to_string)
    }
}

#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed completion response: {0}")]
    Decode(String),
    #[error("{0}")]
    EmptyResponse(String),
}

impl CompletionError {
    /// Transport failures, 429 and 5xx may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Transport(_) | CompletionError::RateLimited(_) => true,
            CompletionError::Http { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }
}

/// Map a non-success HTTP status and body to a `CompletionError`.
pub fn error_from_status(status: u16, body: &str) -> CompletionError {
    match status {
        401 | 403 => CompletionError::Auth(format!("HTTP {}: {}", status, body)),
        429 => CompletionError::RateLimited(body.to_string()),
        _ => CompletionError::Http {
            status,
            message: body.to_string(),
        },
    }
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;
}
