use opsdesk_types::{FieldFamily, OperationKind, ResourceKind};
use std::str::FromStr;

// ── FieldFamily ───────────────────────────────────────────────────

#[test]
fn family_round_trips_through_str() {
    for family in FieldFamily::ALL {
        assert_eq!(FieldFamily::from_str(family.as_str()).unwrap(), family);
    }
}

#[test]
fn family_unknown_name_is_error() {
    assert!(FieldFamily::from_str("commission").is_err());
}

#[test]
fn family_adjustment_fields() {
    assert_eq!(FieldFamily::Balance.adjustment_field(), "balance_adjustment");
    assert_eq!(FieldFamily::Profit.adjustment_field(), "profit_adjustment");
    assert_eq!(FieldFamily::Salary.adjustment_field(), "salary_adjustment");
}

#[test]
fn family_commit_operation_maps_back() {
    for family in FieldFamily::ALL {
        assert_eq!(family.commit_operation().family(), Some(family));
    }
}

#[test]
fn family_serializes_snake_case() {
    let json = serde_json::to_string(&FieldFamily::CreditScore).unwrap();
    assert_eq!(json, "\"credit_score\"");
}

// ── OperationKind ─────────────────────────────────────────────────

#[test]
fn package_operations_target_packages() {
    assert_eq!(OperationKind::AddPackage.resource(), ResourceKind::Packages);
    assert_eq!(OperationKind::UpdatePackage.resource(), ResourceKind::Packages);
    assert_eq!(OperationKind::TogglePackageActive.resource(), ResourceKind::Packages);
}

#[test]
fn user_operations_target_users() {
    assert_eq!(OperationKind::UpdateBalance.resource(), ResourceKind::Users);
    assert_eq!(OperationKind::ResetAccount.resource(), ResourceKind::Users);
    assert_eq!(OperationKind::UpdateUserPackage.resource(), ResourceKind::Users);
}

#[test]
fn non_adjustment_operations_have_no_family() {
    assert_eq!(OperationKind::ToggleActive.family(), None);
    assert_eq!(OperationKind::UpdateLoginPassword.family(), None);
}

// ── ResourceKind ──────────────────────────────────────────────────

#[test]
fn resource_kind_parses_legacy_alias() {
    assert_eq!(ResourceKind::from_str("packs").unwrap(), ResourceKind::Packages);
    assert_eq!(ResourceKind::from_str("users").unwrap(), ResourceKind::Users);
    assert!(ResourceKind::from_str("wallets").is_err());
}
