use crate::shared::datetime::Granularity;
use crate::test_helpers::factory::Factory;
use serde_json::json;

#[test]
fn test_bucket_factory_defaults() {
    let bucket = Factory::bucket().create();

    assert_eq!(bucket.key_fields.get("id"), Some(&json!("k1")));
    assert_eq!(bucket.interval.granularity, Granularity::Minute);
    assert_eq!(bucket.interval.label, "2024-05-01T12:00");
    assert_eq!(bucket.count, 1);
    assert_eq!(bucket.stats.recent_timestamps.len(), 1);
    assert!(bucket.stats.averages.contains_key(&Granularity::Minute));
}

#[test]
fn test_bucket_factory_overrides() {
    let bucket = Factory::bucket()
        .with_key("key", "233")
        .with_granularity(Granularity::Hour)
        .starting_minutes_later(90)
        .with_count(4)
        .with_rate(Granularity::Hour, 7, false)
        .with_label("")
        .create();

    assert_eq!(bucket.key_fields.get("id"), None);
    assert_eq!(bucket.interval.granularity, Granularity::Hour);
    assert_eq!(bucket.interval.label, "");
    assert_eq!(bucket.count, 4);
    assert_eq!(bucket.stats.averages[&Granularity::Hour].rate, 7);
}
