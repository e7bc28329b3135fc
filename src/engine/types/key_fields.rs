use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key-field values identifying a logical entity, in configuration order.
///
/// Also used as a query filter, where it may hold any subset of the
/// configured key fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyFields(IndexMap<String, Value>);

impl KeyFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every entry of `filter` is present here with an equal value.
    pub fn matches(&self, filter: &KeyFields) -> bool {
        filter
            .iter()
            .all(|(name, value)| self.get(name) == Some(value))
    }

    /// Order-independent identity string, stable across processes.
    pub fn canonical(&self) -> String {
        let mut pairs: Vec<(&String, &Value)> = self.0.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
            .into_iter()
            .map(|(name, value)| format!("{}:{}", Value::from(name.as_str()), value))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<(String, Value)> for KeyFields {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
