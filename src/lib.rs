//! Narrative analysis of news and blog articles via an LLM completion service.
//!
//! [`NarrativeAnalyzer`] exposes three operations: a cross-article narrative
//! analysis for a research question, a single-article summary, and search
//! keyword extraction. Each returns a [`ResultEnvelope`].

pub mod analyzer;
pub mod clients;
pub mod config;
pub mod deserializers;
pub mod envelope;
pub mod error;
pub mod fences;
pub mod prompts;
pub mod types;

pub use analyzer::NarrativeAnalyzer;
pub use envelope::ResultEnvelope;
pub use types::{
    Article, ArticleAnalysis, Keyword, NarrativeAnalysisResult, NarrativeStatistic,
    ResearchRequest,
};
