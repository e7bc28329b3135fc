use crate::engine::types::Event;
use serde_json::{Map, Value, json};

pub struct EventFactory {
    fields: Map<String, Value>,
}

impl EventFactory {
    pub fn new() -> Self {
        let mut fields = Map::new();
        fields.insert("id".into(), json!("k1"));
        Self { fields }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn create(self) -> Event {
        Event::new(Value::Object(self.fields))
    }

    /// Events sharing every field, each tagged with its index under `seq`.
    pub fn create_list(self, count: usize) -> Vec<Event> {
        (0..count)
            .map(|i| {
                let mut fields = self.fields.clone();
                fields.insert("seq".into(), json!(i));
                Event::new(Value::Object(fields))
            })
            .collect()
    }
}
