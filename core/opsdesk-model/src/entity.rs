use opsdesk_types::{ResourceKind, RowId};
use serde::{Deserialize, Serialize};

/// A record as returned by the admin backend.
///
/// Never mutated after it is received. The `data` field holds the server's
/// JSON object, nested sub-objects (wallet, package reference, creator)
/// included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    pub kind: ResourceKind,
    pub data: serde_json::Value,
}

impl RawEntity {
    pub fn new(kind: ResourceKind, data: serde_json::Value) -> Self {
        Self { kind, data }
    }

    /// The record's identity, if it carries a usable one.
    pub fn id(&self) -> Option<RowId> {
        self.data.get("id").and_then(RowId::from_json)
    }

    /// The value at a JSON pointer into `data`, e.g. `/wallet/balance`.
    /// Missing sub-objects resolve to `None`.
    pub fn get(&self, pointer: &str) -> Option<&serde_json::Value> {
        self.data.pointer(pointer)
    }

    /// Top-level fields holding scalars (strings, numbers, booleans, null).
    /// Nested objects and arrays are skipped.
    pub fn scalar_fields(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.data
            .as_object()
            .into_iter()
            .flat_map(|map| map.iter())
            .filter(|(_, v)| !v.is_object() && !v.is_array())
    }
}
