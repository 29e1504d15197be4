//! Request and payload types for the analyzer operations.
//!
//! Payloads wrap the model's JSON exactly as parsed. Typed views over the
//! requested layout are available through accessors and never alter the
//! wrapped value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::deserializers::de_string_forgiving;

/// Number of pie-chart entries the analysis prompt asks for.
pub const EXPECTED_STATISTICS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub unique_id: String,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRequest {
    pub research_question: String,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Typed view of one `articleAnalysis` entry.
///
/// Keys follow the capitalized names the prompt requests; camelCase and
/// lowercase variants are accepted too.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArticleAnalysis {
    #[serde(
        rename = "UniqueId",
        alias = "uniqueId",
        alias = "id",
        default,
        deserialize_with = "de_string_forgiving"
    )]
    pub unique_id: String,
    #[serde(
        rename = "Title",
        alias = "title",
        default,
        deserialize_with = "de_string_forgiving"
    )]
    pub title: String,
    #[serde(
        rename = "Summary",
        alias = "summary",
        default,
        deserialize_with = "de_string_forgiving"
    )]
    pub summary: String,
    #[serde(rename = "Narratives", alias = "narratives", default)]
    pub narratives: Value,
    #[serde(rename = "Dominance", alias = "dominance", default)]
    pub dominance: Value,
    #[serde(rename = "Evolution", alias = "evolution", default)]
    pub evolution: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed view of one pie-chart slice.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NarrativeStatistic {
    #[serde(alias = "Narrative", default, deserialize_with = "de_string_forgiving")]
    pub narrative: String,
    #[serde(alias = "Value", default)]
    pub value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parsed narrative analysis reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NarrativeAnalysisResult(Value);

impl From<Value> for NarrativeAnalysisResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl NarrativeAnalysisResult {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// `articleAnalysis` entries that fit [`ArticleAnalysis`]; others are skipped.
    pub fn article_analysis(&self) -> Vec<ArticleAnalysis> {
        typed_entries(self.0.get("articleAnalysis"))
    }

    /// `statistics` entries that fit [`NarrativeStatistic`]; others are skipped.
    pub fn statistics(&self) -> Vec<NarrativeStatistic> {
        typed_entries(self.0.get("statistics"))
    }

    pub fn overall_conclusion(&self) -> Option<&str> {
        self.0.get("overallConclusion").and_then(Value::as_str)
    }

    /// Structural deviations from the requested layout.
    ///
    /// Purely advisory: callers decide whether any of these matter.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.0.is_object() {
            issues.push("reply is not a JSON object".to_string());
            return issues;
        }

        match self.0.get("articleAnalysis") {
            Some(Value::Array(entries)) => {
                for (i, entry) in entries.iter().enumerate() {
                    match serde_json::from_value::<ArticleAnalysis>(entry.clone()) {
                        Ok(a) if a.unique_id.trim().is_empty() => {
                            issues.push(format!("articleAnalysis[{}] has no id", i))
                        }
                        Ok(_) => {}
                        Err(e) => issues.push(format!("articleAnalysis[{}]: {}", i, e)),
                    }
                }
            }
            _ => issues.push("articleAnalysis is missing or not an array".to_string()),
        }

        match self.0.get("statistics") {
            Some(Value::Array(entries)) => {
                if entries.len() != EXPECTED_STATISTICS {
                    issues.push(format!(
                        "expected {} statistics entries, got {}",
                        EXPECTED_STATISTICS,
                        entries.len()
                    ));
                }
                for (i, entry) in entries.iter().enumerate() {
                    match serde_json::from_value::<NarrativeStatistic>(entry.clone()) {
                        Ok(s) if s.narrative.trim().is_empty() => {
                            issues.push(format!("statistics[{}] has no narrative", i))
                        }
                        Ok(_) => {}
                        Err(e) => issues.push(format!("statistics[{}]: {}", i, e)),
                    }
                }
            }
            _ => issues.push("statistics is missing or not an array".to_string()),
        }

        match self.overall_conclusion() {
            Some(c) if !c.trim().is_empty() => {}
            _ => issues.push("overallConclusion is missing or not a non-empty string".to_string()),
        }
        issues
    }
}

fn typed_entries<T: for<'de> Deserialize<'de>>(value: Option<&Value>) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| serde_json::from_value(e.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Parsed keyword reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyword(Value);

impl From<Value> for Keyword {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl Keyword {
    /// `{"keyword": keyword}`, the layout the prompt expects back.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self(serde_json::json!({ "keyword": keyword.into() }))
    }

    /// The `keyword` string field, or the reply itself when it is a bare string.
    pub fn keyword(&self) -> Option<&str> {
        match &self.0 {
            Value::String(s) => Some(s),
            other => other.get("keyword").and_then(Value::as_str),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn research_request_uses_camel_case() {
        let req: ResearchRequest = serde_json::from_value(json!({
            "researchQuestion": "q",
            "articles": [{"uniqueId": "1", "title": "t", "summary": "s"}]
        }))
        .unwrap();
        assert_eq!(req.articles[0].unique_id, "1");
    }

    #[test]
    fn views_accept_prompt_and_lowercase_keys() {
        let v = json!({
            "articleAnalysis": [
                {"UniqueId": 1, "Title": "A", "Summary": "s", "Narratives": [{"n": 1}],
                 "Dominance": [], "Evolution": "grew"},
                {"id": "2", "title": "B", "summary": "t", "narratives": [], "tone": "calm"}
            ],
            "statistics": [{"narrative": "x", "value": 30}],
            "overallConclusion": "done",
            "notes": "kept"
        });
        let r = NarrativeAnalysisResult::from(v.clone());
        let articles = r.article_analysis();
        assert_eq!(articles[0].unique_id, "1");
        assert_eq!(articles[0].evolution, json!("grew"));
        assert_eq!(articles[1].unique_id, "2");
        assert_eq!(articles[1].extra.get("tone"), Some(&json!("calm")));
        assert_eq!(r.statistics()[0].value, json!(30));
        assert_eq!(r.overall_conclusion(), Some("done"));
        // Views never rewrite the wrapped reply.
        assert_eq!(r.as_value(), &v);
    }

    #[test]
    fn views_skip_entries_that_do_not_fit() {
        let r = NarrativeAnalysisResult::from(json!({
            "articleAnalysis": [{"id": "1", "UniqueId": "1"}, {"id": "2"}],
            "overallConclusion": {"answer": "yes"}
        }));
        assert_eq!(r.article_analysis().len(), 1);
        assert!(r.statistics().is_empty());
        assert_eq!(r.overall_conclusion(), None);
    }

    #[test]
    fn validate_reports_layout_issues_without_failing() {
        let issues = NarrativeAnalysisResult::from(json!([1, 2])).validate();
        assert_eq!(issues, vec!["reply is not a JSON object".to_string()]);

        let issues = NarrativeAnalysisResult::from(json!({
            "articleAnalysis": [],
            "statistics": [],
            "overallConclusion": "c"
        }))
        .validate();
        assert_eq!(issues, vec!["expected 5 statistics entries, got 0".to_string()]);

        let stats: Vec<Value> = (0..5)
            .map(|i| json!({"narrative": format!("n{}", i), "value": 20}))
            .collect();
        let ok = NarrativeAnalysisResult::from(json!({
            "articleAnalysis": [{"UniqueId": "1"}],
            "statistics": stats,
            "overallConclusion": "c"
        }));
        assert!(ok.validate().is_empty());
    }

    #[test]
    fn keyword_accessor_reads_object_or_string() {
        assert_eq!(Keyword::new("climate change").keyword(), Some("climate change"));
        assert_eq!(Keyword::from(json!("floods")).keyword(), Some("floods"));
        assert_eq!(Keyword::from(json!({"keyword": ["a", "b"]})).keyword(), None);
        assert_eq!(Keyword::from(json!({"keywords": "a"})).keyword(), None);
    }

    #[test]
    fn keyword_serializes_as_wrapped_value() {
        let v = serde_json::to_value(Keyword::new("x")).unwrap();
        assert_eq!(v, json!({"keyword": "x"}));
    }
}
