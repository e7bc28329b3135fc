pub mod core;
pub mod errors;
pub mod query;
pub mod rollup_engine;
pub mod schema;
pub mod storage;
pub mod store;
pub mod types;


pub use errors::{RollupError, StorageError, ValidationError};
pub use rollup_engine::RollupEngine;
