//! Payloads exchanged with the admin backend.
//!
//! Three exchanges matter to the session:
//! 1. A listing fetch returns raw entities (see [`opsdesk_model::RawEntity`])
//! 2. A preview request returns a [`PreviewResult`]; advisory, no side effects
//! 3. A commit sends a [`CommitRequest`] and returns a [`CommitResponse`],
//!    whose optional entity decides between a point update and a refetch

use crate::error::{ConsoleError, ConsoleResult};
use opsdesk_model::{coerce, RawEntity};
use opsdesk_types::{FieldFamily, OperationKind, ResourceKind, RowId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A condition the backend reports alongside a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewFlag {
    /// A negative balance will be brought back to zero.
    NegativeBalanceCleared,
    /// Frozen (on hold) funds will be released to the balance.
    OnHoldReleased,
    CommissionIncreases,
    CommissionDecreases,
    BalanceIncreases,
    BalanceDecreases,
}

/// Wire key of each flag.
const FLAG_KEYS: [(&str, PreviewFlag); 6] = [
    ("negative_balance_cleared", PreviewFlag::NegativeBalanceCleared),
    ("on_hold_moved_to_balance", PreviewFlag::OnHoldReleased),
    ("commission_will_increase", PreviewFlag::CommissionIncreases),
    ("commission_will_decrease", PreviewFlag::CommissionDecreases),
    ("balance_will_increase", PreviewFlag::BalanceIncreases),
    ("balance_will_decrease", PreviewFlag::BalanceDecreases),
];

/// A second quantity an adjustment moves along with the main one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompanionValue {
    pub current: f64,
    /// Absent when the backend only reports the current figure.
    pub resulting: Option<f64>,
}

/// Server-computed outcome of an adjustment that has not been committed.
///
/// Replaced wholesale on every accepted response; never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResult {
    pub family: FieldFamily,
    pub current_value: f64,
    pub adjustment: f64,
    pub resulting_value: f64,
    /// On-hold funds for balance, commission for profit, wallet balance for
    /// salary.
    pub companion: Option<CompanionValue>,
    /// Signed change of the companion figure, when reported.
    pub difference: Option<f64>,
    pub flags: Vec<PreviewFlag>,
}

impl PreviewResult {
    /// A preview with no companion figure and no flags.
    pub fn new(family: FieldFamily, current_value: f64, adjustment: f64, resulting_value: f64) -> Self {
        Self {
            family,
            current_value,
            adjustment,
            resulting_value,
            companion: None,
            difference: None,
            flags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_companion(mut self, current: f64, resulting: Option<f64>) -> Self {
        self.companion = Some(CompanionValue { current, resulting });
        self
    }

    #[must_use]
    pub fn with_difference(mut self, difference: f64) -> Self {
        self.difference = Some(difference);
        self
    }

    #[must_use]
    pub fn with_flag(mut self, flag: PreviewFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    pub fn has_flag(&self, flag: PreviewFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Reads the `data` object of a preview response.
    ///
    /// The current and resulting figures are required; every other field is
    /// optional. Numbers may arrive as strings (`"12.50"`).
    pub fn from_wire(family: FieldFamily, data: &Value) -> ConsoleResult<Self> {
        let object = data
            .as_object()
            .ok_or_else(|| ConsoleError::Protocol(format!("{family} preview is not an object")))?;

        let name = family.as_str();
        let required = |key: String| -> ConsoleResult<f64> {
            object
                .get(&key)
                .filter(|v| !v.is_null())
                .map(coerce::to_decimal)
                .ok_or_else(|| ConsoleError::Protocol(format!("{family} preview lacks {key}")))
        };
        let optional = |key: &str| object.get(key).filter(|v| !v.is_null()).map(coerce::to_decimal);

        let mut preview = Self::new(
            family,
            required(format!("current_{name}"))?,
            optional(family.adjustment_field()).unwrap_or(0.0),
            required(format!("resulting_{name}"))?,
        );

        let companion = match family {
            FieldFamily::Balance => Some(("current_on_hold", None)),
            FieldFamily::Profit => Some(("current_commission", Some("resulting_commission"))),
            FieldFamily::Salary => Some(("current_balance", Some("resulting_balance"))),
            FieldFamily::CreditScore => None,
        };
        if let Some((current_key, resulting_key)) = companion
            && let Some(current) = optional(current_key)
        {
            preview = preview.with_companion(current, resulting_key.and_then(optional));
        }

        if let Some(difference) = optional(&format!("{name}_difference")) {
            preview = preview.with_difference(difference);
        }

        for (key, flag) in FLAG_KEYS {
            if object.get(key).is_some_and(coerce::is_truthy) {
                preview = preview.with_flag(flag);
            }
        }
        Ok(preview)
    }
}

/// A write sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRequest {
    pub operation: OperationKind,
    /// The row the write targets; `None` for creations.
    pub subject: Option<RowId>,
    /// Form fields as the backend expects them.
    pub payload: Map<String, Value>,
}

impl CommitRequest {
    pub fn new(operation: OperationKind) -> Self {
        Self {
            operation,
            subject: None,
            payload: Map::new(),
        }
    }

    /// A write against an existing row.
    pub fn for_subject(operation: OperationKind, subject: RowId) -> Self {
        Self {
            subject: Some(subject),
            ..Self::new(operation)
        }
    }

    /// Commit of a numeric adjustment. The amount goes under the family's
    /// name (`"balance": "500"`), as the adjustment forms send it.
    pub fn adjustment(family: FieldFamily, subject: RowId, amount: impl Into<Value>) -> Self {
        Self::for_subject(family.commit_operation(), subject).with_field(family.as_str(), amount)
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// The listing this write lands in.
    pub fn resource(&self) -> ResourceKind {
        self.operation.resource()
    }
}

/// The backend's answer to a commit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommitResponse {
    /// Success text to show the operator.
    pub message: Option<String>,
    /// The updated record, when the endpoint returns one.
    pub entity: Option<RawEntity>,
}

impl CommitResponse {
    pub fn with_entity(entity: RawEntity) -> Self {
        Self {
            message: None,
            entity: Some(entity),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Reads a `{ "message": ..., "data": ... }` response body. A `data`
    /// field that is missing, `null` or not an object means the endpoint
    /// returned no entity.
    pub fn from_wire(resource: ResourceKind, body: &Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let entity = body
            .get("data")
            .filter(|data| data.is_object())
            .map(|data| RawEntity::new(resource, data.clone()));
        Self { message, entity }
    }
}
