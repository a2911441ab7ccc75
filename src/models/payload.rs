use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untrusted property payload as returned by the backend.
///
/// Any key may be missing, `null`, a scalar or a nested object. Accessors
/// treat `null` the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPropertyPayload(Map<String, Value>);

impl RawPropertyPayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap any JSON value. Non-object values yield an empty payload.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    /// Non-null value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Follow `path` through nested objects. Stops at the first missing,
    /// `null` or non-object step.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.get(first)?;
        for key in rest {
            current = current.as_object()?.get(*key).filter(|v| !v.is_null())?;
        }
        Some(current)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawPropertyPayload {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
