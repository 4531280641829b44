use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DebtError {
    #[error("invalid input: {field} = {value}")]
    InvalidInput {
        field: &'static str,
        value: String,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("debt account not found: {id}")]
    AccountNotFound {
        id: Uuid,
    },

    #[error("degenerate term: zero-month amortization requested")]
    DegenerateTerm,

    #[error("payment dated {payment} precedes last interest date {last}")]
    PaymentDateOutOfOrder {
        last: NaiveDate,
        payment: NaiveDate,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

impl DebtError {
    pub(crate) fn invalid(field: &'static str, value: impl ToString) -> Self {
        DebtError::InvalidInput {
            field,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DebtError>;

/// reject negative monetary inputs at the boundary
pub(crate) fn ensure_non_negative(field: &'static str, amount: Money) -> Result<()> {
    if amount.is_negative() {
        return Err(DebtError::invalid(field, amount));
    }
    Ok(())
}
