//! Projection and column table for the user-management screen.

use crate::coerce;
use crate::projector::carry_scalars;
use crate::{ColumnDef, RawEntity, Row, RowProjector, TableSchema};
use opsdesk_types::{ResourceKind, RowId};
use serde_json::Value;

/// Projects user accounts (with their wallets) into table rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserProjector;

impl UserProjector {
    pub fn new() -> Self {
        Self
    }
}

impl RowProjector for UserProjector {
    fn resource(&self) -> ResourceKind {
        ResourceKind::Users
    }

    fn schema(&self) -> TableSchema {
        TableSchema::new(
            ResourceKind::Users,
            vec![
                ColumnDef::identifier("id", "#"),
                ColumnDef::text("username", "Username"),
                ColumnDef::text("phoneNo", "Phone No"),
                ColumnDef::text("gender", "Gender"),
                ColumnDef::decimal("balance", "Balance"),
                ColumnDef::text("referralCode", "Referral Code"),
                ColumnDef::text("profile_picture", "Image"),
                ColumnDef::ratio("submissions", "Today's submission total"),
                ColumnDef::decimal("profit", "Today's profit"),
                ColumnDef::ratio("total_submission_set", "Total Submission Set"),
                ColumnDef::decimal("wallet_commission", "Income").sort_only(),
                ColumnDef::integer("total_play", "Products submitted").sort_only(),
                ColumnDef::integer("total_negative_product", "Negative products").sort_only(),
                ColumnDef::decimal("today_profit", "Profit today").sort_only(),
                ColumnDef::integer("number_of_submission_set_today", "Sets today").sort_only(),
            ],
        )
    }

    fn project(&self, id: RowId, raw: &RawEntity) -> Row {
        let mut row = carry_scalars(id, raw);

        row.set("gender", gender_label(raw.get("/gender")));
        row.set("phoneNo", cloned_or_null(raw.get("/phone_number")));
        row.set(
            "balance",
            coerce::or_default(raw.get("/wallet/balance"), Value::from(0)),
        );
        row.set("referralCode", cloned_or_null(raw.get("/referral_code")));
        row.set(
            "submissions",
            format!(
                "{}/{}",
                count_display(raw.get("/total_play")),
                count_display(raw.get("/total_available_play")),
            ),
        );
        row.set("active", cloned_or_null(raw.get("/is_active")));
        row.set(
            "profit",
            coerce::or_default(raw.get("/today_profit"), Value::from(0)),
        );

        let sets_today = raw.get("/number_of_submission_set_today");
        let sets_allowed = raw.get("/wallet/package/number_of_set");
        let any_set = sets_today.is_some_and(coerce::is_truthy)
            || sets_allowed.is_some_and(coerce::is_truthy);
        let total_submission_set = if any_set {
            format!("{}/{}", count_display(sets_today), count_display(sets_allowed))
        } else {
            "0/0".to_string()
        };
        row.set("total_submission_set", total_submission_set);

        row
    }
}

/// `m`/`f` (any case) become labels; any other code is kept verbatim.
fn gender_label(code: Option<&Value>) -> Value {
    match code {
        Some(Value::String(s)) if s.eq_ignore_ascii_case("m") => Value::from("Male"),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("f") => Value::from("Female"),
        Some(other) => other.clone(),
        None => Value::Null,
    }
}

fn cloned_or_null(value: Option<&Value>) -> Value {
    value.cloned().unwrap_or(Value::Null)
}

/// Counter as shown inside an `"x/y"` ratio; missing counters show as 0.
fn count_display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "0".to_string(),
        Some(v) => coerce::display(v),
    }
}
