use opsdesk_model::{RawEntity, Row};
use opsdesk_types::{ResourceKind, RowId};
use serde_json::json;

fn make_entity(data: serde_json::Value) -> RawEntity {
    RawEntity::new(ResourceKind::Users, data)
}

// ── Identity ─────────────────────────────────────────────────────

#[test]
fn id_reads_numeric_id() {
    let e = make_entity(json!({"id": 17, "username": "alice"}));
    assert_eq!(e.id(), Some(RowId::from(17)));
}

#[test]
fn id_reads_string_id() {
    let e = make_entity(json!({"id": "u-17"}));
    assert_eq!(e.id(), Some(RowId::new("u-17")));
}

#[test]
fn id_missing_or_null_is_none() {
    assert_eq!(make_entity(json!({"username": "x"})).id(), None);
    assert_eq!(make_entity(json!({"id": null})).id(), None);
    assert_eq!(make_entity(json!(null)).id(), None);
}

// ── JSON pointer helpers ─────────────────────────────────────────

#[test]
fn get_follows_nested_paths() {
    let e = make_entity(json!({"created_by": {"username": "root"}, "wallet": {"balance": "19.50"}}));
    assert_eq!(e.get("/created_by/username"), Some(&json!("root")));
    assert_eq!(e.get("/wallet/balance"), Some(&json!("19.50")));
}

#[test]
fn get_through_a_missing_sub_object_is_none() {
    let e = make_entity(json!({"wallet": null}));
    assert_eq!(e.get("/wallet/package/name"), None);
    assert_eq!(e.get("/anything"), None);
}

// ── Scalar fields ────────────────────────────────────────────────

#[test]
fn scalar_fields_skip_containers() {
    let e = make_entity(json!({
        "id": 1,
        "username": "alice",
        "wallet": {"balance": 3},
        "tags": ["a"],
        "note": null
    }));
    let mut keys: Vec<&str> = e.scalar_fields().map(|(k, _)| k.as_str()).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["id", "note", "username"]);
}

#[test]
fn scalar_fields_of_non_object_is_empty() {
    assert_eq!(make_entity(json!([1, 2, 3])).scalar_fields().count(), 0);
}

// ── Serialization ────────────────────────────────────────────────

#[test]
fn serde_roundtrip() {
    let original = make_entity(json!({"id": 4, "wallet": {"balance": "10.00"}}));
    let text = serde_json::to_string(&original).unwrap();
    let parsed: RawEntity = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, original);
}

// ── Row ──────────────────────────────────────────────────────────

#[test]
fn row_exposes_id_as_field() {
    let row = Row::new(RowId::from(5));
    assert_eq!(row.get("id"), Some(&json!(5)));
    assert_eq!(row.display("id"), "5");
}

#[test]
fn row_id_cannot_be_overwritten() {
    let mut row = Row::new(RowId::from(5));
    row.set("id", 99);
    assert_eq!(row.id(), &RowId::from(5));
    assert_eq!(row.get("id"), Some(&json!(5)));
}

#[test]
fn row_display_of_missing_field_is_empty() {
    let row = Row::new(RowId::from(1)).with("name", "Gold");
    assert_eq!(row.display("name"), "Gold");
    assert_eq!(row.display("missing"), "");
}

#[test]
fn row_serializes_flat() {
    let row = Row::new(RowId::from(2)).with("balance", 12.5);
    let value = serde_json::to_value(&row).unwrap();
    assert_eq!(value, json!({"id": 2, "balance": 12.5}));
}
