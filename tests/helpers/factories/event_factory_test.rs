use crate::shared::field_path::FieldPath;
use crate::test_helpers::factory::Factory;
use serde_json::json;

#[test]
fn test_event_factory() {
    let event = Factory::event()
        .with("event", "hit")
        .with("payload", json!({ "latency": 30 }))
        .create();

    let latency = FieldPath::parse("payload.latency").unwrap();
    let id = FieldPath::parse("id").unwrap();
    assert_eq!(event.get_field(&latency), Some(&json!(30)));
    assert_eq!(event.get_field(&id), Some(&json!("k1")));
}

#[test]
fn test_event_factory_list_and_without() {
    let events = Factory::event().without("id").create_list(3);
    let id = FieldPath::parse("id").unwrap();
    let seq = FieldPath::parse("seq").unwrap();

    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.get_field(&id).is_none()));
    assert_eq!(events[2].get_field(&seq), Some(&json!(2)));
}
