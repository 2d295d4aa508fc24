//! The pre-submit gate every commit passes before it reaches the network.

use crate::protocol::CommitRequest;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Why a commit payload was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(String),

    #[error("{field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Decides whether a commit may be sent.
pub trait Validator: Send + Sync {
    fn validate(&self, request: &CommitRequest) -> Result<(), ValidationError>;
}

/// Requires every payload field to be filled in, except the ones on an
/// allow-list.
///
/// A field is empty when it is `null` or a blank string. Numbers and
/// booleans, `0` and `false` included, always count as filled in.
#[derive(Debug, Clone, Default)]
pub struct RequiredFields {
    optional: HashSet<String>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets the named fields be empty.
    #[must_use]
    pub fn allowing<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional.extend(fields.into_iter().map(Into::into));
        self
    }
}

impl Validator for RequiredFields {
    fn validate(&self, request: &CommitRequest) -> Result<(), ValidationError> {
        let missing = request
            .payload
            .iter()
            .filter(|(key, _)| !self.optional.contains(key.as_str()))
            .find(|(_, value)| is_blank(value));

        match missing {
            Some((key, _)) => Err(ValidationError::MissingField(key.clone())),
            None => Ok(()),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
