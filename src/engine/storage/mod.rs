pub mod cas;
pub mod filter;
pub mod memory;
pub mod merge_ops;
pub mod timeout;
pub mod traits;


pub use cas::CasBucketStore;
pub use filter::BucketFilter;
pub use memory::MemoryBucketStore;
pub use merge_ops::MergeOps;
pub use timeout::with_timeout;
pub use traits::{BucketStore, UpsertOutcome, VersionedBucketStore};
