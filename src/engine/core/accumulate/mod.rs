pub mod delta;
pub mod merge;
pub mod summary;
pub mod window;


pub use delta::EventDelta;
pub use merge::{apply, merge};
pub use summary::{NumericSummary, SummaryStats};
pub use window::{estimate_rate, estimate_rates, push_bounded};
