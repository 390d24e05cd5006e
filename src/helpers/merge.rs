use crate::error::{ChartError, ChartResult};

use super::{Map, Value};

/// Whether `value` is a plain key/value object (not an array, function or scalar).
#[must_use]
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

/// Recursively copies objects and arrays; every other value is returned as-is.
///
/// Function references are shared rather than duplicated.
#[must_use]
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), deep_clone(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(deep_clone).collect()),
        other => other.clone(),
    }
}

/// Deep-clones `target`, then overwrites its top-level keys with `source`'s.
///
/// Nested objects in `source` replace the target's entry wholesale; there is
/// no recursive merge.
pub fn extend(target: &Value, source: &Value) -> ChartResult<Value> {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            Ok(Value::Object(extend_map(target, source)))
        }
        _ => Err(ChartError::InvalidArgument(format!(
            "extend only accepts objects (got {:?} and {:?})",
            target.kind(),
            source.kind()
        ))),
    }
}

pub(crate) fn extend_map(target: &Map, source: &Map) -> Map {
    let mut merged: Map = target
        .iter()
        .map(|(key, value)| (key.clone(), deep_clone(value)))
        .collect();
    for (key, value) in source {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
