//! Narrative analysis over a completion service.
//!
//! Each operation builds one prompt, issues one completion request, and
//! parses the reply. Failures never escape: they come back as a failure
//! [`ResultEnvelope`] with an `"Error: "` message and are logged.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::clients::{
    CompletionRequest, CompletionService, OpenAiCompletionClient, RetryingCompletionService,
};
use crate::config::Config;
use crate::envelope::ResultEnvelope;
use crate::error::{AnalysisError, Result};
use crate::fences::{strip_json_fence, strip_json_fence_strict};
use crate::prompts;
use crate::types::{Keyword, NarrativeAnalysisResult, ResearchRequest};

pub const ANALYSIS_SUCCESS: &str = "Narrative analysis generated successfully.";
pub const SUMMARY_SUCCESS: &str = "Summary generated successfully.";
pub const KEYWORD_SUCCESS: &str = "Keyword extracted successfully.";

#[derive(Clone)]
pub struct NarrativeAnalyzer {
    service: Arc<dyn CompletionService>,
    model: String,
}

impl NarrativeAnalyzer {
    pub fn new(service: Arc<dyn CompletionService>, model: impl Into<String>) -> Self {
        Self {
            service,
            model: model.into(),
        }
    }

    /// Analyzer backed by the OpenAI-compatible HTTP client described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let completion = &config.completion;
        let api_key = config.runtime.require_api_key()?;
        let client = OpenAiCompletionClient::new(
            api_key,
            completion.base_url.clone(),
            completion.timeout_ms,
        )?;
        let service: Arc<dyn CompletionService> = if completion.max_retries > 0 {
            Arc::new(RetryingCompletionService::new(
                Arc::new(client),
                completion.max_retries,
                completion.retry_base_delay_ms,
            ))
        } else {
            Arc::new(client)
        };
        Ok(Self::new(service, completion.model.clone()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_analysis(
        &self,
        request: &ResearchRequest,
    ) -> ResultEnvelope<NarrativeAnalysisResult> {
        let result = self.try_generate_analysis(request).await;
        if let Err(e) = &result {
            error!("Error fetching narrative analysis: {}", e);
        }
        ResultEnvelope::from_result(result, ANALYSIS_SUCCESS)
    }

    pub async fn generate_summary(&self, text: &str) -> ResultEnvelope<String> {
        let result = self.complete(prompts::summary_prompt(text)).await;
        if let Err(e) = &result {
            error!("Error generating summary: {}", e);
        }
        ResultEnvelope::from_result(result, SUMMARY_SUCCESS)
    }

    pub async fn extract_keyword(&self, text: &str) -> ResultEnvelope<Keyword> {
        let result = self.try_extract_keyword(text).await;
        if let Err(e) = &result {
            error!("Error generating keyword: {}", e);
        }
        ResultEnvelope::from_result(result, KEYWORD_SUCCESS)
    }

    async fn try_generate_analysis(
        &self,
        request: &ResearchRequest,
    ) -> std::result::Result<NarrativeAnalysisResult, AnalysisError> {
        let prompt = prompts::analysis_prompt(&request.research_question, &request.articles);
        let reply = self.complete(prompt).await?;
        let cleaned = strip_json_fence(&reply);

        let value: Value =
            serde_json::from_str(&cleaned).map_err(|e| AnalysisError::Parse(e.to_string()))?;
        let analysis = NarrativeAnalysisResult::from(value);

        let issues = analysis.validate();
        if !issues.is_empty() {
            warn!(
                "Narrative analysis deviates from requested layout: {}",
                issues.join("; ")
            );
        }
        Ok(analysis)
    }

    async fn try_extract_keyword(
        &self,
        text: &str,
    ) -> std::result::Result<Keyword, AnalysisError> {
        let reply = self.complete(prompts::keyword_prompt(text)).await?;
        let cleaned = strip_json_fence_strict(&reply);
        let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
            debug!("Keyword reply was not valid JSON: {}", e);
            AnalysisError::KeywordParse
        })?;
        let keyword = Keyword::from(value);
        if keyword.keyword().is_none() {
            warn!("Keyword reply has no string `keyword` field: {}", keyword.as_value());
        }
        Ok(keyword)
    }

    /// One completion round trip; returns `choices[0].message.content`.
    async fn complete(&self, prompt: String) -> std::result::Result<String, AnalysisError> {
        debug!(
            "Sending prompt (model={}, chars={})",
            self.model,
            prompt.len()
        );
        let request = CompletionRequest::system(self.model.clone(), prompt);
        let response = self.service.complete(request).await?;
        Ok(response.into_first_content()?)
    }
}
