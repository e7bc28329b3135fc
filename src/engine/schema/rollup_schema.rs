use crate::engine::core::accumulate::EventDelta;
use crate::engine::errors::ValidationError;
use crate::engine::types::{Event, KeyFields};
use crate::shared::config::{FieldSpecConfig, RollupConfig};
use crate::shared::datetime::{CalendarTimeBucketer, Granularity, TimeConfig};
use crate::shared::field_path::FieldPath;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, warn};

/// A configured event field and the name its results are reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedField {
    pub path: FieldPath,
    pub output: String,
}

/// Validated rollup configuration. Built once; shared by the write and read
/// paths.
#[derive(Debug, Clone)]
pub struct RollupSchema {
    granularity: Granularity,
    rejected_granularity: Option<String>,
    key_fields: Vec<FieldPath>,
    window_size: usize,
    calculations: Vec<TrackedField>,
    unique_fields: Vec<TrackedField>,
    time: TimeConfig,
}

impl RollupSchema {
    pub fn from_config(config: &RollupConfig, time: TimeConfig) -> Result<Self, ValidationError> {
        if config.key_fields.is_empty() {
            return Err(ValidationError::EmptyKeyFields);
        }
        if config.window_size == 0 {
            return Err(ValidationError::InvalidWindowSize(config.window_size));
        }
        if let Some(tz) = time.invalid_timezone() {
            return Err(ValidationError::InvalidTimezone(tz.to_string()));
        }

        let choice = Granularity::resolve_configured(&config.granularity);

        let key_fields = config
            .key_fields
            .iter()
            .map(|raw| parse_path(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let calculations = tracked_fields(&config.calculations)?;
        let unique_fields = tracked_fields(&config.unique_fields)?;

        info!(
            target: "snel_rollup::schema",
            granularity = %choice.granularity,
            key_fields = key_fields.len(),
            calculations = calculations.len(),
            unique_fields = unique_fields.len(),
            window_size = config.window_size,
            "Rollup schema validated"
        );

        Ok(Self {
            granularity: choice.granularity,
            rejected_granularity: choice.rejected,
            key_fields,
            window_size: config.window_size,
            calculations,
            unique_fields,
            time,
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The configured granularity string when it was replaced by the fallback.
    pub fn rejected_granularity(&self) -> Option<&str> {
        self.rejected_granularity.as_deref()
    }

    pub fn ladder(&self) -> Vec<Granularity> {
        self.granularity.ladder()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn key_fields(&self) -> &[FieldPath] {
        &self.key_fields
    }

    pub fn calculations(&self) -> &[TrackedField] {
        &self.calculations
    }

    pub fn unique_fields(&self) -> &[TrackedField] {
        &self.unique_fields
    }

    pub fn time(&self) -> &TimeConfig {
        &self.time
    }

    pub fn bucketer(&self) -> CalendarTimeBucketer {
        CalendarTimeBucketer::new(self.time.clone())
    }

    /// Pulls every configured key field out of the event.
    pub fn extract_keys(&self, event: &Event) -> Result<KeyFields, ValidationError> {
        let mut keys = KeyFields::new();
        for path in &self.key_fields {
            let value = event
                .get_field(path)
                .ok_or_else(|| ValidationError::MissingKeyField {
                    field: path.to_string(),
                })?;
            if value.is_object() || value.is_array() {
                warn!(target: "snel_rollup::schema", field = %path, "Key field is not a scalar");
                return Err(ValidationError::WrongType {
                    field: path.to_string(),
                    expected: "scalar",
                });
            }
            keys.insert(path.as_str(), value.clone());
        }
        Ok(keys)
    }

    /// Collects calculation samples and uniqueness observations for one event.
    pub fn extract_delta(
        &self,
        event: &Event,
        timestamp: DateTime<Utc>,
    ) -> Result<EventDelta, ValidationError> {
        let mut delta = EventDelta::at(timestamp);

        for tracked in &self.calculations {
            let Some(value) = event.get_field(&tracked.path) else {
                continue;
            };
            let sample = value.as_f64().ok_or_else(|| ValidationError::WrongType {
                field: tracked.path.to_string(),
                expected: "number",
            })?;
            delta.calculations.push((tracked.output.clone(), sample));
        }

        for tracked in &self.unique_fields {
            let Some(value) = event.get_field(&tracked.path) else {
                continue;
            };
            let observed = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(ValidationError::WrongType {
                        field: tracked.path.to_string(),
                        expected: "scalar",
                    });
                }
            };
            delta.uniques.push((tracked.output.clone(), observed));
        }

        Ok(delta)
    }

    /// A query filter may only name configured key fields.
    pub fn validate_filter(&self, filter: &KeyFields) -> Result<(), ValidationError> {
        for name in filter.names() {
            if !self.key_fields.iter().any(|k| k.as_str() == name) {
                return Err(ValidationError::UnknownKeyField {
                    field: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_path(raw: &str) -> Result<FieldPath, ValidationError> {
    FieldPath::parse(raw).ok_or_else(|| ValidationError::InvalidFieldPath(raw.to_string()))
}

fn tracked_fields(specs: &[FieldSpecConfig]) -> Result<Vec<TrackedField>, ValidationError> {
    let mut outputs = HashSet::new();
    specs
        .iter()
        .map(|spec| {
            let path = parse_path(&spec.field)?;
            let output = spec.output_name().trim().to_string();
            if output.is_empty() {
                return Err(ValidationError::InvalidFieldPath(spec.field.clone()));
            }
            if !outputs.insert(output.clone()) {
                return Err(ValidationError::DuplicateOutput(output));
            }
            Ok(TrackedField { path, output })
        })
        .collect()
}
