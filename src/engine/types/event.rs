use crate::shared::field_path::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single observation handed to the write path. The payload is an arbitrary
/// JSON document; configured field paths pick values out of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Event {
    pub payload: Value,
}

impl Event {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    pub fn get_field(&self, path: &FieldPath) -> Option<&Value> {
        path.lookup(&self.payload)
    }
}

impl From<Value> for Event {
    fn from(payload: Value) -> Self {
        Self::new(payload)
    }
}
