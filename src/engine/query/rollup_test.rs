use super::rollup::RollupReader;
use crate::engine::errors::{RollupError, ValidationError};
use crate::engine::schema::RollupSchema;
use crate::engine::storage::MemoryBucketStore;
use crate::engine::store::BucketRecorder;
use crate::engine::types::KeyFields;
use crate::shared::clock::ManualClock;
use crate::shared::datetime::Granularity;
use crate::test_helpers::factories::{
    BucketFactory, EventFactory, RollupSchemaFactory, TimestampFactory,
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    store: Arc<MemoryBucketStore>,
    clock: Arc<ManualClock>,
    recorder: BucketRecorder,
    reader: RollupReader,
}

fn harness(schema: RollupSchema) -> Harness {
    let schema = Arc::new(schema);
    let store = Arc::new(MemoryBucketStore::new());
    let clock = Arc::new(ManualClock::new(t0()));
    let timeout = Duration::from_secs(1);
    Harness {
        recorder: BucketRecorder::new(schema.clone(), store.clone(), clock.clone(), timeout),
        reader: RollupReader::new(schema, store.clone(), timeout),
        store,
        clock,
    }
}

fn t0() -> DateTime<Utc> {
    TimestampFactory::utc_datetime(2024, 5, 1, 12, 0, 0)
}

fn around(ts: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (ts - ChronoDuration::hours(1), ts + ChronoDuration::hours(1))
}

#[tokio::test]
async fn three_events_roll_up_into_one_point() {
    crate::logging::init_for_tests();
    let h = harness(RollupSchemaFactory::new().with_granularity("minute").create());
    let event = EventFactory::new().with("id", "k1").create();

    for _ in 0..3 {
        h.recorder.record(&event).await.unwrap();
        h.clock.advance(ChronoDuration::seconds(10));
    }

    let (start, end) = around(t0());
    let report = h
        .reader
        .query(start, end, &KeyFields::new().with("id", "k1"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.overview.count, 1);
    assert_eq!(report.time_series.len(), 1);
    assert_eq!(report.time_series[0].val, 3);
    assert!(report.overview.avg[&Granularity::Minute].has_forecast);
    assert_eq!(report.meta.start, t0());
    assert_eq!(report.meta.end, t0() + ChronoDuration::minutes(1));
}

#[tokio::test]
async fn a_full_unit_of_history_clears_the_forecast() {
    let h = harness(RollupSchemaFactory::new().with_granularity("minute").create());
    let event = EventFactory::new().create();

    h.recorder.record(&event).await.unwrap();
    h.clock.advance(ChronoDuration::seconds(2));
    h.recorder.record(&event).await.unwrap();

    let (start, end) = around(t0());
    let report = h
        .reader
        .query(start, end, &KeyFields::new())
        .await
        .unwrap()
        .unwrap();

    let second = report.overview.avg[&Granularity::Second];
    assert!(!second.has_forecast);
    assert_eq!(second.val, 1.0);
    assert!(report.overview.avg[&Granularity::Minute].has_forecast);
}

#[tokio::test]
async fn query_is_idempotent() {
    let h = harness(
        RollupSchemaFactory::new()
            .with_calculation("latency", "latency")
            .with_unique("user", "users")
            .create(),
    );
    for (latency, user) in [(10.0, "A"), (20.0, "A"), (30.0, "B")] {
        let event = EventFactory::new()
            .with("latency", latency)
            .with("user", user)
            .create();
        h.recorder.record(&event).await.unwrap();
        h.clock.advance(ChronoDuration::seconds(30));
    }

    let (start, end) = around(t0());
    let first = h.reader.query(start, end, &KeyFields::new()).await.unwrap();
    let second = h.reader.query(start, end, &KeyFields::new()).await.unwrap();

    assert_eq!(first, second);
    let report = first.unwrap();
    assert_eq!(report.overview.count, 2);
    assert_eq!(report.calculations["latency"].mean, Some(20.0));
    let users = report.uniques["users"];
    assert_eq!((users.unique, users.total, users.duplicated), (2, 3, 1));
}

#[tokio::test]
async fn empty_range_returns_none() {
    let h = harness(RollupSchemaFactory::new().create());
    h.recorder.record(&EventFactory::new().create()).await.unwrap();

    let later = t0() + ChronoDuration::days(1);
    let result = h
        .reader
        .query(later, later + ChronoDuration::hours(1), &KeyFields::new())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn range_must_fully_contain_buckets() {
    let h = harness(RollupSchemaFactory::new().create());
    h.recorder.record(&EventFactory::new().create()).await.unwrap();

    let result = h
        .reader
        .query(t0(), t0() + ChronoDuration::seconds(30), &KeyFields::new())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn filter_selects_subset_of_keys() {
    let h = harness(
        RollupSchemaFactory::new()
            .with_key_fields(&["key", "event"])
            .create(),
    );
    for event_name in ["hit", "hit", "miss"] {
        let event = EventFactory::new()
            .with("key", "233")
            .with("event", event_name)
            .create();
        h.recorder.record(&event).await.unwrap();
    }

    let (start, end) = around(t0());
    let hits = h
        .reader
        .query(start, end, &KeyFields::new().with("event", "hit"))
        .await
        .unwrap()
        .unwrap();
    let everything = h
        .reader
        .query(start, end, &KeyFields::new().with("key", "233"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(hits.time_series[0].val, 2);
    assert_eq!(everything.overview.count, 2);
}

#[tokio::test]
async fn other_granularities_are_not_scanned() {
    let h = harness(RollupSchemaFactory::new().with_granularity("minute").create());
    h.store.put(
        BucketFactory::new()
            .with_granularity(Granularity::Hour)
            .create(),
    );

    let (start, end) = around(t0());
    let result = h.reader.query(start, end, &KeyFields::new()).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let h = harness(RollupSchemaFactory::new().create());
    let end = t0() - ChronoDuration::minutes(1);

    let err = h
        .reader
        .query(t0(), end, &KeyFields::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RollupError::Validation(ValidationError::InvalidRange { start: t0(), end })
    );
}

#[tokio::test]
async fn unknown_filter_field_is_rejected() {
    let h = harness(RollupSchemaFactory::new().create());
    let (start, end) = around(t0());

    let err = h
        .reader
        .query(start, end, &KeyFields::new().with("tenant", "acme"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
}
