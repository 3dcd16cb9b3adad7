//! Deserializers for fields the model fills in inconsistently.
//!
//! Completion output frequently mixes `"95"`, `95` and `"95%"` for the same
//! field, so display values are normalised to text instead of rejected.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a string, number, bool or null and yields its text form.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// Accepts an integer or a numeric string; anything else becomes zero.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .unwrap_or(0),
        Value::String(s) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|f| *f >= 0.0)
            .map(|f| f.round() as u64)
            .unwrap_or(0),
        _ => 0,
    })
}

/// Like [`text`], but a JSON `null` or missing value stays `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = text(deserializer)?;
    Ok(if text.is_empty() { None } else { Some(text) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "text", default)]
        score: String,
        #[serde(deserialize_with = "count", default)]
        claims: u64,
    }

    #[test]
    fn numbers_and_strings_collapse_to_text() {
        let a: Row = serde_json::from_str(r#"{"score": 95, "claims": "12"}"#).unwrap();
        let b: Row = serde_json::from_str(r#"{"score": "95%", "claims": 12.4}"#).unwrap();
        assert_eq!(a.score, "95");
        assert_eq!(b.score, "95%");
        assert_eq!(a.claims, 12);
        assert_eq!(b.claims, 12);
    }

    #[test]
    fn unparseable_counts_become_zero() {
        let row: Row = serde_json::from_str(r#"{"claims": "lots"}"#).unwrap();
        assert_eq!(row.claims, 0);
        assert_eq!(row.score, "");
    }
}
