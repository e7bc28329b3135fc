pub mod reduce;
pub mod report;
pub mod rollup;

#[cfg(test)]
mod rollup_test;

pub use reduce::reduce;
pub use report::{
    AvgSummary, DurationSummary, Overview, ReportMeta, RollupReport, SeriesPoint, UniqueSummary,
};
pub use rollup::RollupReader;
