use opsdesk_model::{PackageProjector, RawEntity, RowProjector, UserProjector};
use opsdesk_types::{ResourceKind, RowId};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

fn user(data: Value) -> RawEntity {
    RawEntity::new(ResourceKind::Users, data)
}

fn package(data: Value) -> RawEntity {
    RawEntity::new(ResourceKind::Packages, data)
}

fn full_user() -> RawEntity {
    user(json!({
        "id": 12,
        "username": "alice01",
        "gender": "F",
        "phone_number": "+15550100",
        "referral_code": "REF123",
        "wallet": {"balance": "250.75", "package": {"number_of_set": 3}},
        "total_play": 14,
        "total_available_play": 40,
        "is_active": true,
        "today_profit": 12.5,
        "number_of_submission_set_today": 2
    }))
}

// ── Users ────────────────────────────────────────────────────────

#[test]
fn user_projection_derives_display_fields() {
    let row = UserProjector.project_entity(&full_user()).unwrap();

    assert_eq!(row.id(), &RowId::from(12));
    assert_eq!(row.get("gender"), Some(&json!("Female")));
    assert_eq!(row.get("phoneNo"), Some(&json!("+15550100")));
    assert_eq!(row.get("balance"), Some(&json!("250.75")));
    assert_eq!(row.get("referralCode"), Some(&json!("REF123")));
    assert_eq!(row.get("submissions"), Some(&json!("14/40")));
    assert_eq!(row.get("active"), Some(&json!(true)));
    assert_eq!(row.get("profit"), Some(&json!(12.5)));
    assert_eq!(row.get("total_submission_set"), Some(&json!("2/3")));
}

#[test]
fn user_projection_carries_raw_scalars() {
    let row = UserProjector.project_entity(&full_user()).unwrap();
    assert_eq!(row.get("username"), Some(&json!("alice01")));
    assert_eq!(row.get("total_play"), Some(&json!(14)));
    assert_eq!(row.get("phone_number"), Some(&json!("+15550100")));
    // nested objects are flattened into derived fields, not copied
    assert_eq!(row.get("wallet"), None);
}

#[test]
fn male_code_is_case_insensitive() {
    let row = UserProjector
        .project_entity(&user(json!({"id": 1, "gender": "m"})))
        .unwrap();
    assert_eq!(row.get("gender"), Some(&json!("Male")));
}

#[test]
fn unknown_gender_code_is_preserved() {
    let row = UserProjector
        .project_entity(&user(json!({"id": 1, "gender": "x"})))
        .unwrap();
    assert_eq!(row.get("gender"), Some(&json!("x")));
}

#[test]
fn missing_fields_resolve_to_defaults() {
    let row = UserProjector.project_entity(&user(json!({"id": 3}))).unwrap();

    assert_eq!(row.get("balance"), Some(&json!(0)));
    assert_eq!(row.get("profit"), Some(&json!(0)));
    assert_eq!(row.get("gender"), Some(&Value::Null));
    assert_eq!(row.get("phoneNo"), Some(&Value::Null));
    assert_eq!(row.get("submissions"), Some(&json!("0/0")));
    assert_eq!(row.get("total_submission_set"), Some(&json!("0/0")));
}

#[test]
fn zero_balance_falls_back_to_numeric_zero() {
    let row = UserProjector
        .project_entity(&user(json!({"id": 3, "wallet": {"balance": 0}})))
        .unwrap();
    assert_eq!(row.get("balance"), Some(&json!(0)));
}

#[test]
fn submission_set_with_only_package_limit() {
    let row = UserProjector
        .project_entity(&user(json!({
            "id": 3,
            "wallet": {"package": {"number_of_set": 4}}
        })))
        .unwrap();
    assert_eq!(row.get("total_submission_set"), Some(&json!("0/4")));
}

#[test]
fn entity_without_id_is_not_projected() {
    assert!(UserProjector.project_entity(&user(json!({"username": "ghost"}))).is_none());
}

#[test]
fn project_all_skips_unidentified_records() {
    let rows = UserProjector.project_all(&[
        user(json!({"id": 1})),
        user(json!({"username": "ghost"})),
        user(json!({"id": 2})),
    ]);
    let ids: Vec<&RowId> = rows.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![&RowId::from(1), &RowId::from(2)]);
}

#[test]
fn zero_padded_string_id_keeps_its_form() {
    let row = UserProjector
        .project_entity(&user(json!({"id": "007", "username": "bond"})))
        .unwrap();
    assert_eq!(row.id(), &RowId::new("007"));
    assert_eq!(row.get("id"), Some(&json!("007")));
    assert_eq!(row.display("id"), "007");
}

// ── Packages ─────────────────────────────────────────────────────

#[test]
fn package_projection_formats_money_and_percentages() {
    let row = PackageProjector
        .project_entity(&package(json!({
            "id": 7,
            "name": "Gold",
            "usd_value": "1234.50",
            "profit_percentage": 2.5,
            "special_product_percentage": "10",
            "minimum_balance_for_submissions": 1000000,
            "created_by": {"username": "root"},
            "is_active": true
        })))
        .unwrap();

    assert_eq!(row.get("usd_value"), Some(&json!("$1,234.5")));
    assert_eq!(row.get("profit_percentage"), Some(&json!("2.5%")));
    assert_eq!(row.get("special_product_percentage"), Some(&json!("10%")));
    assert_eq!(
        row.get("minimum_balance_for_submissions"),
        Some(&json!("$1,000,000"))
    );
    assert_eq!(row.get("created_by"), Some(&json!("root")));
    assert_eq!(row.get("name"), Some(&json!("Gold")));
    assert_eq!(row.get("is_active"), Some(&json!(true)));
}

#[test]
fn package_defaults() {
    let row = PackageProjector
        .project_entity(&package(json!({"id": 8, "name": "Free"})))
        .unwrap();
    assert_eq!(row.get("usd_value"), Some(&json!("$0")));
    assert_eq!(row.get("profit_percentage"), Some(&json!("0%")));
    assert_eq!(row.get("created_by"), Some(&Value::Null));
}

// ── Determinism ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn user_projection_is_deterministic(
        id in 1i64..10_000,
        username in "[a-z]{0,12}",
        gender in prop::sample::select(vec!["m", "F", "x", ""]),
        balance in -1e6f64..1e6,
        play in 0u32..100,
    ) {
        let raw = user(json!({
            "id": id,
            "username": username,
            "gender": gender,
            "wallet": {"balance": balance},
            "total_play": play,
        }));
        let a = UserProjector.project_entity(&raw);
        let b = UserProjector.project_entity(&raw);
        prop_assert_eq!(a, b);
    }
}
