//! Resource kinds, adjustable field families and commit operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A listing the console can load into its row cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Customer accounts with their wallets.
    Users,
    /// Subscription packages.
    Packages,
}

impl ResourceKind {
    /// Wire name of the resource.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Packages => "packages",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(Self::Users),
            "packages" | "packs" => Ok(Self::Packages),
            other => Err(crate::Error::UnknownResource(other.to_string())),
        }
    }
}

/// A named adjustable quantity with its own preview and commit pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFamily {
    Balance,
    Profit,
    Salary,
    CreditScore,
}

impl FieldFamily {
    /// Every family, in a fixed order.
    pub const ALL: [FieldFamily; 4] = [
        FieldFamily::Balance,
        FieldFamily::Profit,
        FieldFamily::Salary,
        FieldFamily::CreditScore,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::Profit => "profit",
            Self::Salary => "salary",
            Self::CreditScore => "credit_score",
        }
    }

    /// Name of the adjustment field in a preview request body.
    #[must_use]
    pub const fn adjustment_field(&self) -> &'static str {
        match self {
            Self::Balance => "balance_adjustment",
            Self::Profit => "profit_adjustment",
            Self::Salary => "salary_adjustment",
            Self::CreditScore => "credit_score_adjustment",
        }
    }

    /// The commit operation that applies an adjustment of this family.
    #[must_use]
    pub const fn commit_operation(&self) -> OperationKind {
        match self {
            Self::Balance => OperationKind::UpdateBalance,
            Self::Profit => OperationKind::UpdateProfit,
            Self::Salary => OperationKind::UpdateSalary,
            Self::CreditScore => OperationKind::UpdateCreditScore,
        }
    }
}

impl fmt::Display for FieldFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldFamily {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| crate::Error::UnknownFamily(s.to_string()))
    }
}

/// A write the console can commit through the transport.
///
/// Commits are never debounced and never superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    UpdateLoginPassword,
    UpdateWithdrawalPassword,
    UpdateBalance,
    UpdateProfit,
    UpdateSalary,
    UpdateCreditScore,
    ResetAccount,
    ToggleRegistrationBonus,
    ToggleMinBalance,
    ToggleActive,
    UpdateUserPackage,
    AddPackage,
    UpdatePackage,
    TogglePackageActive,
}

impl OperationKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UpdateLoginPassword => "update_login_password",
            Self::UpdateWithdrawalPassword => "update_withdrawal_password",
            Self::UpdateBalance => "update_balance",
            Self::UpdateProfit => "update_profit",
            Self::UpdateSalary => "update_salary",
            Self::UpdateCreditScore => "update_credit_score",
            Self::ResetAccount => "reset_account",
            Self::ToggleRegistrationBonus => "toggle_registration_bonus",
            Self::ToggleMinBalance => "toggle_min_balance",
            Self::ToggleActive => "toggle_active",
            Self::UpdateUserPackage => "update_user_package",
            Self::AddPackage => "add_package",
            Self::UpdatePackage => "update_package",
            Self::TogglePackageActive => "toggle_package_active",
        }
    }

    /// The listing whose rows this operation writes to.
    #[must_use]
    pub const fn resource(&self) -> ResourceKind {
        match self {
            Self::AddPackage | Self::UpdatePackage | Self::TogglePackageActive => {
                ResourceKind::Packages
            }
            _ => ResourceKind::Users,
        }
    }

    /// The adjustable family this operation commits, if any.
    #[must_use]
    pub const fn family(&self) -> Option<FieldFamily> {
        match self {
            Self::UpdateBalance => Some(FieldFamily::Balance),
            Self::UpdateProfit => Some(FieldFamily::Profit),
            Self::UpdateSalary => Some(FieldFamily::Salary),
            Self::UpdateCreditScore => Some(FieldFamily::CreditScore),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
