use slotbook_core::{Interval, ScheduleDraft, ScheduleSet, YearMonth};

fn interval(id: u64, start: &str, end: &str) -> Interval {
    Interval::from_parts(
        id,
        "Jane Doe",
        start.parse().expect("valid start"),
        end.parse().expect("valid end"),
    )
    .expect("valid interval")
}

#[test]
fn interval_serialization_uses_expected_wire_fields() {
    let interval = interval(42, "2024-03-01T09:00:00", "2024-03-01T10:30:00");
    let json = serde_json::to_value(&interval).unwrap();

    assert_eq!(json["id"], 42);
    assert_eq!(json["owner"], "Jane Doe");
    assert_eq!(json["start"], "2024-03-01T09:00:00");
    assert_eq!(json["end"], "2024-03-01T10:30:00");

    let decoded: Interval = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, interval);
}

#[test]
fn deserialize_rejects_reversed_window() {
    let value = serde_json::json!({
        "id": 1,
        "owner": "Jane Doe",
        "start": "2024-03-01T10:00:00",
        "end": "2024-03-01T09:00:00"
    });
    let err = serde_json::from_value::<Interval>(value).unwrap_err();
    assert!(err.to_string().contains("must be after start"), "{err}");
}

#[test]
fn schedule_set_deserialization_restores_order() {
    let value = serde_json::json!([
        {"id": 1, "owner": "Jane Doe", "start": "2024-03-01T09:00:00", "end": "2024-03-01T10:00:00"},
        {"id": 2, "owner": "Jane Doe", "start": "2024-03-09T09:00:00", "end": "2024-03-09T10:00:00"}
    ]);
    let set: ScheduleSet = serde_json::from_value(value).unwrap();
    let ids = set.iter().map(|interval| interval.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn schedule_set_deserialization_rejects_duplicate_ids() {
    let value = serde_json::json!([
        {"id": 5, "owner": "Jane Doe", "start": "2024-03-01T09:00:00", "end": "2024-03-01T10:00:00"},
        {"id": 5, "owner": "Jane Doe", "start": "2024-03-09T09:00:00", "end": "2024-03-09T10:00:00"}
    ]);
    let err = serde_json::from_value::<ScheduleSet>(value).unwrap_err();
    assert!(err.to_string().contains("duplicate schedule id: 5"), "{err}");
}

#[test]
fn draft_from_interval_reproduces_form_fields() {
    let interval = interval(3, "2024-03-01T22:15:00", "2024-03-02T06:00:30");
    let draft = ScheduleDraft::from(&interval);
    assert_eq!(
        draft,
        ScheduleDraft::new("Jane Doe", "2024-03-01", "22:15", "2024-03-02", "06:00:30")
    );
    let reparsed = draft.parse().unwrap();
    assert_eq!((reparsed.start, reparsed.end), (interval.start, interval.end));
}

#[test]
fn year_month_uses_year_month_wire_shape() {
    let month = YearMonth::new(2024, 2).unwrap();
    assert_eq!(
        serde_json::to_value(month).unwrap(),
        serde_json::json!({"year": 2024, "month": 2})
    );
    assert!(serde_json::from_value::<YearMonth>(serde_json::json!({"year": 2024, "month": 13})).is_err());
}
