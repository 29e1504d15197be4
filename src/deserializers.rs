//! Forgiving deserializers for model-produced JSON.
//!
//! Models rarely follow a requested schema to the letter: ids come back as
//! numbers, optional strings come back as `null` or booleans.
//! These helpers coerce the common deviations instead of failing the parse.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a string field that may arrive as a string, number, bool or null.
///
/// # Accepted Formats
///
/// * `"abc"` → `"abc"`
/// * `42` / `4.5` / `true` → their JSON text
/// * `null` → `""`
///
/// Arrays and objects are rejected.
pub fn de_string_forgiving<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "de_string_forgiving")]
        s: String,
    }

    #[test]
    fn coerces_scalars_to_string() {
        let p: Holder = serde_json::from_str(r#"{"s": 12}"#).unwrap();
        assert_eq!(p.s, "12");
        let p: Holder = serde_json::from_str(r#"{"s": null}"#).unwrap();
        assert_eq!(p.s, "");
        let p: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.s, "");
    }

    #[test]
    fn rejects_structured_string() {
        let err = serde_json::from_str::<Holder>(r#"{"s": [1]}"#)
            .err()
            .unwrap()
            .to_string();
        assert!(err.contains("expected a string, found an array"));
    }
}
