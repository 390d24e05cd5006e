use serde::Serialize;
use tracing::trace;

use crate::error::{ChartError, ChartResult};

use super::merge::extend;
use super::{Map, Value};

/// How a state entry reacts to writes. Fixed when the entry is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SetMode {
    /// Writes are shallow-merged into the stored object.
    Merge,
    /// Writes replace the stored value.
    Replace,
}

impl SetMode {
    fn for_value(value: &Value) -> Self {
        if value.is_object() {
            Self::Merge
        } else {
            Self::Replace
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    value: Value,
    mode: SetMode,
}

/// Getter/setter store synthesized from a state mapping.
///
/// Every key of the initial mapping becomes an accessor: [`GetSet::get`]
/// reads it and [`GetSet::set`] writes it and hands back the store for
/// chaining. Keys declared with an object value merge writes into the stored
/// object via [`extend`]; every other key is replaced outright.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetSet {
    entries: indexmap::IndexMap<String, Entry>,
}

impl GetSet {
    #[must_use]
    pub fn new(state: Map) -> Self {
        Self {
            entries: state
                .into_iter()
                .map(|(key, value)| {
                    let mode = SetMode::for_value(&value);
                    (key, Entry { value, mode })
                })
                .collect(),
        }
    }

    /// Builds the store from an object value.
    pub fn from_value(state: Value) -> ChartResult<Self> {
        match state {
            Value::Object(map) => Ok(Self::new(map)),
            other => Err(ChartError::InvalidArgument(format!(
                "getset state must be an object (got {:?})",
                other.kind()
            ))),
        }
    }

    /// Builds the store from a JSON object, preserving key order.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let json: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse state: {e}")))?;
        Self::from_value(Value::from(json))
    }

    /// Declared keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn mode(&self, key: &str) -> Option<SetMode> {
        self.entries.get(key).map(|entry| entry.mode)
    }

    pub fn get(&self, key: &str) -> ChartResult<&Value> {
        self.entries
            .get(key)
            .map(|entry| &entry.value)
            .ok_or_else(|| ChartError::UnknownKey(key.to_owned()))
    }

    /// Writes `value` under `key` and returns the store for further calls.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> ChartResult<&mut Self> {
        let value = value.into();
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| ChartError::UnknownKey(key.to_owned()))?;

        trace!(key, mode = ?entry.mode, kind = ?value.kind(), "set state value");
        entry.value = match entry.mode {
            SetMode::Merge => extend(&entry.value, &value)?,
            SetMode::Replace => value,
        };
        Ok(self)
    }

    /// Current state as an object value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, entry)| (key.clone(), entry.value.clone()))
                .collect(),
        )
    }
}

/// Synthesizes a [`GetSet`] store over `state`.
#[must_use]
pub fn getset(state: Map) -> GetSet {
    GetSet::new(state)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{GetSet, SetMode};
    use crate::error::ChartError;
    use crate::helpers::Value;

    #[test]
    fn modes_follow_declared_value_kind() {
        let store = GetSet::from_json_str(r#"{"w": 3, "margin": {"top": 4}, "ticks": [1]}"#)
            .expect("state");
        assert_eq!(store.mode("w"), Some(SetMode::Replace));
        assert_eq!(store.mode("margin"), Some(SetMode::Merge));
        assert_eq!(store.mode("ticks"), Some(SetMode::Replace));
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["w", "margin", "ticks"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut store = GetSet::from_value(Value::from(json!({"w": 3}))).expect("state");
        assert!(matches!(store.get("h"), Err(ChartError::UnknownKey(_))));
        assert!(matches!(store.set("h", 1.0), Err(ChartError::UnknownKey(_))));
    }

    #[test]
    fn merge_entries_reject_non_object_writes() {
        let mut store = GetSet::from_value(Value::from(json!({"margin": {"top": 4}})))
            .expect("state");
        let err = store.set("margin", 5.0).expect_err("scalar into object");
        assert!(matches!(err, ChartError::InvalidArgument(_)));
        assert_eq!(store.get("margin").expect("margin").to_json(), json!({"top": 4.0}));
    }

    #[test]
    fn non_object_state_is_rejected() {
        assert!(GetSet::from_json_str("[1, 2]").is_err());
        assert!(GetSet::from_json_str("{").is_err());
    }
}
