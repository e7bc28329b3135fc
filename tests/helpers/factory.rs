pub use super::factories::{BucketFactory, EventFactory, RollupSchemaFactory};

pub struct Factory;

impl Factory {
    pub fn event() -> EventFactory {
        EventFactory::new()
    }

    pub fn bucket() -> BucketFactory {
        BucketFactory::new()
    }

    pub fn schema() -> RollupSchemaFactory {
        RollupSchemaFactory::new()
    }
}
