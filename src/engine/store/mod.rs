pub mod upsert;


pub use upsert::{BucketRecorder, RecordOutcome};
