pub mod rollup_schema;


pub use rollup_schema::{RollupSchema, TrackedField};
