// SPDX-License-Identifier: Apache-2.0

//! Canonical JSON: object keys sorted recursively, no insignificant whitespace.
//! Identical values always produce identical bytes.

use serde::Serialize;
use serde_json::{Map, Value};

pub fn stable_json_string<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let raw = serde_json::to_value(value)?;
    serde_json::to_string(&normalize_json_value(raw))
}

/// Canonical JSON that is safe to inline inside an HTML `<script>` element.
///
/// `</` becomes `<\/`, which decodes to the same string value.
pub fn script_safe_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(stable_json_string(value)?.replace("</", "<\\/"))
}

fn normalize_json_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(k, v)| (k, normalize_json_value(v)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, v);
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_json_value).collect()),
        other => other,
    }
}
