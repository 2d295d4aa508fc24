//! Projection and column table for the package-management screen.

use crate::coerce;
use crate::projector::carry_scalars;
use crate::{ColumnDef, RawEntity, Row, RowProjector, TableSchema};
use opsdesk_types::{ResourceKind, RowId};
use serde_json::Value;

/// Projects subscription packages into table rows with formatted money and
/// percentages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageProjector;

impl PackageProjector {
    pub fn new() -> Self {
        Self
    }
}

impl RowProjector for PackageProjector {
    fn resource(&self) -> ResourceKind {
        ResourceKind::Packages
    }

    fn schema(&self) -> TableSchema {
        TableSchema::new(
            ResourceKind::Packages,
            vec![
                ColumnDef::identifier("id", "#"),
                ColumnDef::text("name", "Name"),
                ColumnDef::decimal("usd_value", "USD Value"),
                ColumnDef::integer("daily_missions", "Daily Missions"),
                ColumnDef::integer("daily_withdrawals", "Daily Withdrawals"),
                ColumnDef::decimal("profit_percentage", "Profit Percentage"),
                ColumnDef::decimal("special_product_percentage", "Special Product %"),
                ColumnDef::decimal(
                    "minimum_balance_for_submissions",
                    "Min Balance for Submissions",
                ),
                ColumnDef::integer("number_of_set", "Number of Sets"),
                ColumnDef::text("short_description", "Short Description"),
                ColumnDef::text("icon", "Icon"),
                ColumnDef::text("created_by", "Created By"),
                ColumnDef::boolean("is_active", "Active"),
            ],
        )
    }

    fn project(&self, id: RowId, raw: &RawEntity) -> Row {
        let mut row = carry_scalars(id, raw);

        row.set("usd_value", currency(raw.get("/usd_value")));
        row.set("profit_percentage", percentage(raw.get("/profit_percentage")));
        row.set(
            "special_product_percentage",
            percentage(raw.get("/special_product_percentage")),
        );
        row.set(
            "minimum_balance_for_submissions",
            currency(raw.get("/minimum_balance_for_submissions")),
        );
        row.set(
            "created_by",
            raw.get("/created_by/username").cloned().unwrap_or(Value::Null),
        );

        row
    }
}

/// `"$1,234.5"`; unset amounts show as `"$0"`.
fn currency(value: Option<&Value>) -> String {
    let amount = coerce::or_default(value, Value::from(0));
    format!("${}", coerce::format_grouped(coerce::to_decimal(&amount)))
}

/// `"12%"`; unset percentages show as `"0%"`.
fn percentage(value: Option<&Value>) -> String {
    let pct = coerce::or_default(value, Value::from(0));
    format!("{}%", coerce::display(&pct))
}
