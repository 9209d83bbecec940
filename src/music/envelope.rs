//! Response envelopes used by the catalog mirrors.
//!
//! Mirrors of the same catalog wrap their payloads differently. Each known
//! layout is a separate total function that either matches or returns `None`;
//! the decoders try them in a fixed order and stop at the first match.

use serde_json::Value;

/// Where a search response kept its result list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchEnvelope<'a> {
    /// `{"data": {"results": [...]}}`
    Wrapped(&'a [Value]),
    /// `{"data": {"data": {"results": [...]}}}`
    DoubleWrapped(&'a [Value]),
    /// `{"results": [...]}`
    Bare(&'a [Value]),
}

impl<'a> SearchEnvelope<'a> {
    /// First layout holding a non-empty result list.
    pub fn decode(body: &'a Value) -> Option<Self> {
        wrapped(body)
            .map(SearchEnvelope::Wrapped)
            .or_else(|| double_wrapped(body).map(SearchEnvelope::DoubleWrapped))
            .or_else(|| bare(body).map(SearchEnvelope::Bare))
    }

    pub fn results(&self) -> &'a [Value] {
        match *self {
            SearchEnvelope::Wrapped(r)
            | SearchEnvelope::DoubleWrapped(r)
            | SearchEnvelope::Bare(r) => r,
        }
    }
}

fn non_empty_list(value: Option<&Value>) -> Option<&[Value]> {
    value
        .and_then(Value::as_array)
        .filter(|list| !list.is_empty())
        .map(Vec::as_slice)
}

fn wrapped(body: &Value) -> Option<&[Value]> {
    non_empty_list(body.get("data").and_then(|d| d.get("results")))
}

fn double_wrapped(body: &Value) -> Option<&[Value]> {
    non_empty_list(
        body.get("data")
            .and_then(|d| d.get("data"))
            .and_then(|d| d.get("results")),
    )
}

fn bare(body: &Value) -> Option<&[Value]> {
    non_empty_list(body.get("results"))
}

/// Where a point-lookup response kept the song record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SongEnvelope<'a> {
    /// `{"data": [song, ...]}`
    List(&'a Value),
    /// `{"data": song}`
    Record(&'a Value),
    /// `{"data": {"results": [song]}}` or `{"data": {"data": song}}`
    Nested(&'a Value),
    /// `song`
    Bare(&'a Value),
}

impl<'a> SongEnvelope<'a> {
    pub fn decode(body: &'a Value) -> Option<Self> {
        data_list(body)
            .map(SongEnvelope::List)
            .or_else(|| data_record(body).map(SongEnvelope::Record))
            .or_else(|| data_nested(body).map(SongEnvelope::Nested))
            .or_else(|| bare_record(body).map(SongEnvelope::Bare))
    }

    pub fn song(&self) -> &'a Value {
        match *self {
            SongEnvelope::List(s)
            | SongEnvelope::Record(s)
            | SongEnvelope::Nested(s)
            | SongEnvelope::Bare(s) => s,
        }
    }
}

fn has_id(value: &Value) -> bool {
    value.get("id").is_some_and(crate::normalize::truthy)
}

fn first_record(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(list) => list.first().filter(|s| s.is_object()),
        Value::Object(_) if has_id(value) => Some(value),
        _ => None,
    }
}

fn data_list(body: &Value) -> Option<&Value> {
    body.get("data")
        .filter(|d| d.is_array())
        .and_then(first_record)
}

fn data_record(body: &Value) -> Option<&Value> {
    body.get("data").filter(|d| d.is_object() && has_id(d))
}

fn data_nested(body: &Value) -> Option<&Value> {
    let inner = body.get("data").filter(|d| d.is_object())?;
    ["results", "data"]
        .iter()
        .filter_map(|key| inner.get(*key))
        .find_map(first_record)
}

fn bare_record(body: &Value) -> Option<&Value> {
    Some(body).filter(|b| b.is_object() && has_id(b))
}
