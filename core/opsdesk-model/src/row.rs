use crate::coerce;
use opsdesk_types::RowId;
use serde::Serialize;
use serde_json::{Map, Value};

/// Key under which every row exposes its identity as a regular field.
const ID_FIELD: &str = "id";

/// Flat, display-ready projection of a [`crate::RawEntity`].
///
/// The identity is fixed at construction. Every other field can change, but
/// only by replacing the whole row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    #[serde(skip)]
    id: RowId,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Row {
    /// Creates a row holding only its identity.
    pub fn new(id: RowId) -> Self {
        let mut fields = Map::new();
        fields.insert(ID_FIELD.to_string(), id.to_json());
        Self { id, fields }
    }

    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Sets a field. Writes to the identity field are ignored.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if key == ID_FIELD {
            return;
        }
        self.fields.insert(key, value.into());
    }

    /// Builder form of [`Row::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String form of a field, as shown in the table. Absent fields render
    /// as the empty string.
    pub fn display(&self, key: &str) -> String {
        self.fields.get(key).map(coerce::display).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
