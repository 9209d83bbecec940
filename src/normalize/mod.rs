//! # Normalize Module
//!
//! Pure mapping of untrusted provider records into the canonical [`Song`].
//! Nothing in here performs I/O and nothing in here fails: a missing field, a
//! field of the wrong type or an unexpected nesting level degrades to the
//! default value for that field.
//!
//! - [`catalog`] - records from the catalog mirrors (several known field layouts)
//! - [`media`] - info records produced by the media extraction tool
//!
//! [`Song`]: crate::types::Song

pub mod catalog;
pub mod media;

pub use catalog::{normalize_song, normalize_songs};
pub use media::normalize_media;

use serde_json::Value;

use crate::utils;

/// Loose truthiness for JSON values: null, false, 0 and empty strings or containers are falsy.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Field lookup that treats falsy values as absent.
pub(crate) fn field<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| truthy(v))
}

/// Stringifies a value without unescaping; falsy values become `""`.
pub(crate) fn plain_text(value: &Value) -> String {
    if !truthy(value) {
        return String::new();
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Like [`plain_text`], but strings are HTML-unescaped.
pub(crate) fn safe_unescape(value: &Value) -> String {
    match value {
        Value::String(s) => utils::unescape(s),
        other => plain_text(other),
    }
}

/// First truthy field among `keys`, as plain text.
pub(crate) fn first_text(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| field(record, key))
        .map(plain_text)
}

/// Whole seconds from an integer, float or numeric string; anything else is 0.
pub(crate) fn seconds(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

/// URL of an image or download entry, keyed either `url` or `link`.
pub(crate) fn entry_url(entry: &Value) -> String {
    ["url", "link"]
        .iter()
        .find_map(|key| field(entry, key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_matches_loose_semantics() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!([])));
        assert!(truthy(&json!("a")));
        assert!(truthy(&json!(1.5)));
    }

    #[test]
    fn test_seconds_parsing() {
        assert_eq!(seconds(Some(&json!(245))), 245);
        assert_eq!(seconds(Some(&json!("245"))), 245);
        assert_eq!(seconds(Some(&json!(212.7))), 212);
        assert_eq!(seconds(Some(&json!("abc"))), 0);
        assert_eq!(seconds(Some(&json!(-3))), 0);
        assert_eq!(seconds(None), 0);
    }

    #[test]
    fn test_entry_url_accepts_link_key() {
        assert_eq!(entry_url(&json!({"link": "l"})), "l");
        assert_eq!(entry_url(&json!({"url": "u", "link": "l"})), "u");
        assert_eq!(entry_url(&json!({"url": ""})), "");
    }
}
