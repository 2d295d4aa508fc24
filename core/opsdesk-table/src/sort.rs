//! Typed, single-key, stable sorting.
//!
//! Every column carries an explicit coercion rule ([`ColumnType`]). Keys the
//! schema does not know fall back to comparing raw values. Ties keep their
//! prior order; there is no secondary key.

use opsdesk_model::{coerce, ColumnType, Row, TableSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Value of the "sort by order" parameter meaning "no preset".
pub const NO_ORDER: &str = "No filter";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// The other direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// The single active sort key and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Config after the operator clicks the header of `key`: clicking the
    /// active ascending column flips it to descending, anything else sorts
    /// ascending.
    #[must_use]
    pub fn toggled(&self, key: &str) -> Self {
        if self.key == key && self.direction == SortDirection::Ascending {
            Self::descending(key)
        } else {
            Self::ascending(key)
        }
    }

    /// Parses a "sort by order" preset such as `"-today_profit"`.
    ///
    /// A leading `-` means descending. [`NO_ORDER`] and the empty string reset
    /// to `default_key` ascending. Legacy preset names are mapped onto the
    /// row fields they sort.
    pub fn from_order_param(param: &str, default_key: &str) -> Self {
        let param = param.trim();
        if param.is_empty() || param == NO_ORDER {
            return Self::ascending(default_key);
        }
        let (descending, field) = match param.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, param),
        };
        let key = match field {
            "total_games_played" => "total_play",
            other => other,
        };
        if descending {
            Self::descending(key)
        } else {
            Self::ascending(key)
        }
    }
}

/// Compares two rows under `config`, using the column's coercion rule from
/// `schema`.
pub fn compare(a: &Row, b: &Row, config: &SortConfig, schema: &TableSchema) -> Ordering {
    let key = config.key.as_str();
    let left = a.get(key).unwrap_or(&Value::Null);
    let right = b.get(key).unwrap_or(&Value::Null);

    let ordering = match schema.column(key) {
        Some(column) => compare_typed(column.column_type, left, right),
        None => compare_raw(left, right),
    };
    config.direction.apply(ordering)
}

/// Sorts `rows` in place. The sort is stable.
pub fn sort_rows(rows: &mut [&Row], config: &SortConfig, schema: &TableSchema) {
    rows.sort_by(|a, b| compare(a, b, config, schema));
}

/// Comparison under one coercion rule.
pub fn compare_typed(column_type: ColumnType, a: &Value, b: &Value) -> Ordering {
    match column_type {
        ColumnType::Identifier | ColumnType::Integer => {
            coerce::to_integer(a).cmp(&coerce::to_integer(b))
        }
        ColumnType::Text => coerce::to_text(a).cmp(&coerce::to_text(b)),
        ColumnType::Decimal => coerce::to_decimal(a)
            .partial_cmp(&coerce::to_decimal(b))
            .unwrap_or(Ordering::Equal),
        ColumnType::Ratio => coerce::ratio_numerator(a).cmp(&coerce::ratio_numerator(b)),
        ColumnType::Boolean => coerce::is_truthy(a).cmp(&coerce::is_truthy(b)),
    }
}

/// Untyped comparison for keys without a column rule: two numbers compare
/// numerically, anything else compares by string form, unset values as "".
pub fn compare_raw(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            }
        }
        _ => raw_text(a).cmp(&raw_text(b)),
    }
}

fn raw_text(value: &Value) -> String {
    if coerce::is_truthy(value) {
        coerce::display(value)
    } else {
        String::new()
    }
}
