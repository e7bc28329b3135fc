pub mod bucket;
pub mod event;
pub mod key_fields;


pub use bucket::{Bucket, BucketId, BucketStats, RateEstimate, UniqueCounter};
pub use event::Event;
pub use key_fields::KeyFields;
