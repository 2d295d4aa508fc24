//! Identifier types used throughout the opsdesk core.
//!
//! Row identities come from the backend and are kept as text, because the
//! admin API is not consistent about sending them as numbers or strings.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Server-assigned identity of a row.
///
/// Two ids are equal when their textual forms are equal, so `7` and `"7"`
/// name the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Creates a row id from its textual form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads an id out of a JSON value. Only non-empty strings and numbers
    /// qualify; `null`, booleans and containers are not identities.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Converts the id back into a JSON value. Only canonical integers
    /// become numbers; `"007"` or `"+7"` stay strings.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self.0.parse::<i64>() {
            Ok(n) if n.to_string() == self.0 => serde_json::Value::from(n),
            _ => serde_json::Value::String(self.0.clone()),
        }
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RowId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(crate::Error::InvalidRowId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for RowId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowIdVisitor;

        impl Visitor<'_> for RowIdVisitor {
            type Value = RowId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a row id as a number or a non-empty string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RowId, E> {
                Ok(RowId::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RowId, E> {
                Ok(RowId(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RowId, E> {
                if v.is_empty() {
                    return Err(E::invalid_value(de::Unexpected::Str(v), &self));
                }
                Ok(RowId(v.to_string()))
            }
        }

        deserializer.deserialize_any(RowIdVisitor)
    }
}

/// Tag attached to an issued preview request.
///
/// Tokens are only ever compared for equality and order; a larger token was
/// issued later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Returns the raw sequence number.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out strictly increasing request tokens.
#[derive(Debug, Default)]
pub struct TokenSource {
    next: AtomicU64,
}

impl TokenSource {
    /// Creates a source whose first token is `#1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next token.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
