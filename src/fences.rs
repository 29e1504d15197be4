//! Markdown code-fence removal for model replies.
//!
//! Two patterns exist. The analysis reply uses the permissive one, which
//! tolerates any whitespace after the opening fence and before the closing
//! fence. The keyword reply uses the narrow one, which only matches when a
//! newline sits directly after ```` ```json ```` and directly before the
//! closing ```` ``` ````. A fence the narrow pattern does not match is left in
//! place and the text is parsed as-is.

use once_cell::sync::Lazy;
use regex::Regex;

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```json\s*|\s*```$").unwrap());

static JSON_FENCE_STRICT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```json\s*\n|\n```$").unwrap());

/// Strip a leading ```` ```json ```` fence and trailing ```` ``` ````, then trim.
pub fn strip_json_fence(raw: &str) -> String {
    JSON_FENCE.replace_all(raw, "").trim().to_string()
}

/// Like [`strip_json_fence`] but requires newlines adjacent to both fence markers.
pub fn strip_json_fence_strict(raw: &str) -> String {
    JSON_FENCE_STRICT.replace_all(raw, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn strips_standard_fence() {
        let raw = "```json\n{\"a\":1}\n```";
        assert_eq!(strip_json_fence(raw), "{\"a\":1}");
        assert_eq!(strip_json_fence_strict(raw), "{\"a\":1}");
    }

    #[test]
    fn unfenced_payload_only_trimmed() {
        assert_eq!(strip_json_fence("  {\"a\":1}\n"), "{\"a\":1}");
        assert_eq!(strip_json_fence_strict("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn permissive_pattern_tolerates_inline_fence() {
        let raw = "```json {\"keyword\":\"x\"} ```";
        assert_eq!(strip_json_fence(raw), "{\"keyword\":\"x\"}");
    }

    #[test]
    fn strict_pattern_leaves_inline_fence() {
        let raw = "```json {\"keyword\":\"x\"}```";
        assert_eq!(strip_json_fence_strict(raw), raw);
    }

    #[test]
    fn leading_whitespace_defeats_both_anchors() {
        // The opening fence must be the very first thing in the reply.
        let raw = "  ```json\n{}\n```";
        assert!(strip_json_fence(raw).starts_with("```json"));
    }

    #[test]
    fn stripping_preserves_parsed_payload() {
        let doc = r#"{"articleAnalysis":[],"statistics":[{"narrative":"a","value":40}],"overallConclusion":"c"}"#;
        let fenced = format!("```json\n{}\n```", doc);
        let direct: Value = serde_json::from_str(doc).unwrap();
        let once = strip_json_fence(&fenced);
        let twice = strip_json_fence(&once);
        assert_eq!(serde_json::from_str::<Value>(&once).unwrap(), direct);
        assert_eq!(once, twice);
        assert_eq!(
            serde_json::from_str::<Value>(&strip_json_fence_strict(&fenced)).unwrap(),
            direct
        );
    }
}
