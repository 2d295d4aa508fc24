use opsdesk_types::ResourceKind;
use serde::{Deserialize, Serialize};

/// Describes a screen's columns and how each one is compared when sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    pub resource: ResourceKind,
    pub columns: Vec<ColumnDef>,
    /// Column the screen sorts by before the operator picks one.
    pub default_sort_key: String,
}

impl TableSchema {
    pub fn new(resource: ResourceKind, columns: Vec<ColumnDef>) -> Self {
        Self {
            resource,
            columns,
            default_sort_key: "id".to_string(),
        }
    }

    /// Looks up a column by key.
    pub fn column(&self, key: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Whether `key` names a column in this table.
    pub fn has_column(&self, key: &str) -> bool {
        self.column(key).is_some()
    }

    /// Columns rendered in the table, in display order. Sort-only columns
    /// (the "sort by order" presets) are left out.
    pub fn listed_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.listed)
    }
}

/// A column of a console table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Row field the column reads (e.g., "balance", "phoneNo").
    pub key: String,
    pub header: String,
    pub column_type: ColumnType,
    /// False for columns that exist only as sort targets.
    #[serde(default = "listed_by_default")]
    pub listed: bool,
}

fn listed_by_default() -> bool {
    true
}

impl ColumnDef {
    fn simple(key: &str, header: &str, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            column_type,
            listed: true,
        }
    }

    /// Shorthand for the identity column.
    pub fn identifier(key: &str, header: &str) -> Self {
        Self::simple(key, header, ColumnType::Identifier)
    }

    /// Shorthand for a case-insensitive text column.
    pub fn text(key: &str, header: &str) -> Self {
        Self::simple(key, header, ColumnType::Text)
    }

    /// Shorthand for a whole-number column.
    pub fn integer(key: &str, header: &str) -> Self {
        Self::simple(key, header, ColumnType::Integer)
    }

    /// Shorthand for a currency or percentage column.
    pub fn decimal(key: &str, header: &str) -> Self {
        Self::simple(key, header, ColumnType::Decimal)
    }

    /// Shorthand for an `"x/y"` counter column.
    pub fn ratio(key: &str, header: &str) -> Self {
        Self::simple(key, header, ColumnType::Ratio)
    }

    /// Shorthand for a yes/no column.
    pub fn boolean(key: &str, header: &str) -> Self {
        Self::simple(key, header, ColumnType::Boolean)
    }

    /// Marks the column as a sort target that is not rendered.
    #[must_use]
    pub fn sort_only(mut self) -> Self {
        self.listed = false;
        self
    }
}

/// How a column's values are coerced before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Compared as integers; non-numeric ids read as 0.
    Identifier,
    /// Compared as lower-cased strings.
    Text,
    /// Compared as integers; unreadable values read as 0.
    Integer,
    /// Currency and percentage; formatting stripped, compared as floats.
    Decimal,
    /// `"x/y"` counters compared by the numerator only.
    Ratio,
    /// `false` sorts before `true`.
    Boolean,
}
