use crate::engine::schema::RollupSchema;
use crate::shared::config::{FieldSpecConfig, RollupConfig};
use crate::shared::datetime::TimeConfig;

pub struct RollupSchemaFactory {
    config: RollupConfig,
    time: TimeConfig,
}

impl RollupSchemaFactory {
    pub fn new() -> Self {
        Self {
            config: RollupConfig {
                granularity: "minute".into(),
                key_fields: vec!["id".into()],
                window_size: 500,
                calculations: Vec::new(),
                unique_fields: Vec::new(),
            },
            time: TimeConfig::default(),
        }
    }

    pub fn with_granularity(mut self, granularity: &str) -> Self {
        self.config.granularity = granularity.to_string();
        self
    }

    pub fn with_key_fields(mut self, fields: &[&str]) -> Self {
        self.config.key_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.config.window_size = window_size;
        self
    }

    pub fn with_calculation(mut self, field: &str, output: &str) -> Self {
        self.config
            .calculations
            .push(FieldSpecConfig::new(field, output));
        self
    }

    pub fn with_unique(mut self, field: &str, output: &str) -> Self {
        self.config
            .unique_fields
            .push(FieldSpecConfig::new(field, output));
        self
    }

    pub fn with_timezone(mut self, tz: &str) -> Self {
        self.time.timezone = Some(tz.to_string());
        self
    }

    pub fn config(&self) -> RollupConfig {
        self.config.clone()
    }

    pub fn create(self) -> RollupSchema {
        RollupSchema::from_config(&self.config, self.time).expect("valid rollup schema")
    }
}
