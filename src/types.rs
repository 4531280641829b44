use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// unique identifier for a tracked debt
pub type DebtId = Uuid;

/// debt product types with a regulatory policy entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    CreditCard,
    PersonalLoan,
    /// personal loan secured by a vehicle registration
    PersonalLoanVehicle,
    FixedRate,
}

impl DebtType {
    pub const ALL: [DebtType; 4] = [
        DebtType::CreditCard,
        DebtType::PersonalLoan,
        DebtType::PersonalLoanVehicle,
        DebtType::FixedRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DebtType::CreditCard => "credit_card",
            DebtType::PersonalLoan => "personal_loan",
            DebtType::PersonalLoanVehicle => "personal_loan_vehicle",
            DebtType::FixedRate => "fixed_rate",
        }
    }

    /// revolving credit carries a minimum-payment rule
    pub fn is_revolving(&self) -> bool {
        matches!(self, DebtType::CreditCard)
    }
}

impl fmt::Display for DebtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DebtType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DebtType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown debt type: {}", s))
    }
}

/// how interest is charged on a debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestMethod {
    /// monthly interest on the outstanding balance
    ReducingBalance,
    /// daily interest on the outstanding balance, summed over actual days
    DailyAccrual,
    /// flat monthly interest on the original principal
    FixedRate,
}

/// debt lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    Active,
    Paid,
}
