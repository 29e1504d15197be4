use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::clients::traits::{
    CompletionError, CompletionRequest, CompletionResponse, CompletionService, error_from_status,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for OpenAI-compatible `/chat/completions` endpoints
pub struct OpenAiCompletionClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiCompletionClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout_ms: u64,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| CompletionError::Transport(format!("build http client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        debug!(
            "Requesting completion (model={}, messages={}, chars={})",
            request.model,
            request.messages.len(),
            request.messages.iter().map(|m| m.content.len()).sum::<usize>()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_status(status.as_u16(), &body));
        }

        response
            .json::<CompletionResponse>()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let c = OpenAiCompletionClient::new("k", "http://localhost:1234/v1/", 1000).unwrap();
        assert_eq!(c.endpoint(), "http://localhost:1234/v1/chat/completions");
        let c = OpenAiCompletionClient::new("k", DEFAULT_BASE_URL, 1000).unwrap();
        assert_eq!(c.endpoint(), "https://api.openai.com/v1/chat/completions");
    }
}
