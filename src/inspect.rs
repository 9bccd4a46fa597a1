//! Purpose: Shared decoded-entry report builders for CLI output paths.
//! Exports: `EntryRow`, `entry_rows`, report JSON builders, `widen_sample`.
//! Role: Keep entry/type envelope shape consistent across read and widen.
//! Invariants: Stable key names for v0 report payloads.
//! Invariants: Rows preserve document order of the decoded map.

use maplite::api::{JsonMap, JsonValue, to_json};
use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Serialize)]
pub(crate) struct EntryRow {
    pub key: String,
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub value: Value,
    #[serde(skip)]
    pub rendered: String,
}

pub(crate) fn entry_rows(map: &JsonMap) -> Vec<EntryRow> {
    map.iter()
        .map(|(key, value)| EntryRow {
            key: key.clone(),
            type_name: value.type_name(),
            value: value.to_serde(),
            rendered: to_json(value),
        })
        .collect()
}

pub(crate) fn read_report_json(rows: &[EntryRow]) -> Value {
    let mut map = Map::new();
    map.insert("count".to_string(), json!(rows.len()));
    map.insert("entries".to_string(), json!(rows));
    Value::Object(map)
}

pub(crate) fn widen_report_json(
    original: &[EntryRow],
    encoded: &str,
    decoded: &[EntryRow],
) -> Value {
    let mut map = Map::new();
    map.insert("original".to_string(), json!(original));
    map.insert("encoded".to_string(), json!(encoded));
    map.insert("decoded".to_string(), json!(decoded));
    Value::Object(map)
}

// Narrow integer fixtures: a byte-sized and a short-sized value. Both come
// back as plain `int` entries after an encode/decode round trip, which is the
// whole point of the widen demonstration.
pub(crate) fn widen_sample() -> JsonMap {
    let mut map = JsonMap::new();
    map.insert("byteValue".to_string(), JsonValue::Int(123));
    map.insert("shortValue".to_string(), JsonValue::Int(1234));
    map
}
