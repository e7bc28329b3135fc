use chrono::{DateTime, Utc};

/// Everything one event contributes to a bucket, extracted once from the
/// event payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDelta {
    pub timestamp: DateTime<Utc>,
    /// `(output name, sample)` for every configured calculation present on the event
    pub calculations: Vec<(String, f64)>,
    /// `(output name, value)` for every configured uniqueness field present on the event
    pub uniques: Vec<(String, String)>,
}

impl EventDelta {
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            calculations: Vec::new(),
            uniques: Vec::new(),
        }
    }

    pub fn with_calculation(mut self, output: &str, value: f64) -> Self {
        self.calculations.push((output.to_string(), value));
        self
    }

    pub fn with_unique(mut self, output: &str, value: &str) -> Self {
        self.uniques.push((output.to_string(), value.to_string()));
        self
    }
}
