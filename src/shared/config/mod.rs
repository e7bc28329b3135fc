pub mod global;
pub mod model;


pub use global::CONFIG;
pub use model::{
    FieldSpecConfig, LoggingConfig, RetryConfig, RollupConfig, Settings, StorageConfig,
    load_settings, load_settings_from,
};
