pub mod bucket_factory;
pub mod event_factory;
pub mod schema_factory;
pub mod timestamp_factory;

pub use bucket_factory::BucketFactory;
pub use event_factory::EventFactory;
pub use schema_factory::RollupSchemaFactory;
pub use timestamp_factory::TimestampFactory;

#[cfg(test)]
mod bucket_factory_test;
#[cfg(test)]
mod event_factory_test;
#[cfg(test)]
mod timestamp_factory_test;
