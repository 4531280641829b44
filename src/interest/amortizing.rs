use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{DebtError, Result};
use crate::interest::accrual::BillingPeriod;
use crate::interest::PeriodInterest;
use crate::types::InterestMethod;

/// one month of interest on the outstanding balance
pub fn reducing_balance_monthly(balance: Money, annual_rate: Rate) -> Money {
    Money::from_decimal(balance.as_decimal() * annual_rate.monthly_rate())
}

/// flat monthly interest, always charged on the original principal
pub fn fixed_rate_monthly(original_principal: Money, annual_rate: Rate) -> Money {
    Money::from_decimal(original_principal.as_decimal() * annual_rate.monthly_rate())
}

/// one month of interest on `base`, `None` when the product overflows
pub fn checked_monthly_interest(base: Money, annual_rate: Rate) -> Option<Money> {
    base.as_decimal()
        .checked_mul(annual_rate.monthly_rate())
        .map(Money::from_decimal)
}

/// level payment that amortizes `principal` over `term_months`
///
/// payment = P * r * (1 + r)^n / ((1 + r)^n - 1), straight-line when r is zero
pub fn calculate_monthly_payment(principal: Money, annual_rate: Rate, term_months: u32) -> Result<Money> {
    if term_months == 0 {
        return Err(DebtError::DegenerateTerm);
    }
    if principal.is_negative() {
        return Err(DebtError::invalid("principal", principal));
    }
    if annual_rate.is_negative() {
        return Err(DebtError::invalid("annual_rate", annual_rate));
    }

    let r = annual_rate.monthly_rate();
    if r.is_zero() {
        return Ok(principal / Decimal::from(term_months));
    }

    let base = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..term_months {
        compound = compound.checked_mul(base).ok_or_else(|| DebtError::CalculationError {
            message: format!("compound factor overflow at {} months", term_months),
        })?;
    }

    let numerator = principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|v| v.checked_mul(compound))
        .ok_or_else(|| DebtError::CalculationError {
            message: format!("payment overflow for principal {}", principal),
        })?;
    let denominator = compound - Decimal::ONE;

    Ok(Money::from_decimal(numerator / denominator))
}

#[derive(Debug, Clone, Copy)]
pub struct ReducingBalanceInterest {
    pub annual_rate: Rate,
}

impl ReducingBalanceInterest {
    pub fn new(annual_rate: Rate) -> Self {
        Self { annual_rate }
    }
}

impl PeriodInterest for ReducingBalanceInterest {
    fn period_interest(&self, balance: Money, _period: Option<&BillingPeriod>) -> Option<Money> {
        checked_monthly_interest(balance, self.annual_rate)
    }

    fn method(&self) -> InterestMethod {
        InterestMethod::ReducingBalance
    }
}

/// constant interest per period, independent of the running balance
#[derive(Debug, Clone, Copy)]
pub struct FixedRateInterest {
    pub original_principal: Money,
    pub annual_rate: Rate,
}

impl FixedRateInterest {
    pub fn new(original_principal: Money, annual_rate: Rate) -> Self {
        Self {
            original_principal,
            annual_rate,
        }
    }
}

impl PeriodInterest for FixedRateInterest {
    fn period_interest(&self, _balance: Money, _period: Option<&BillingPeriod>) -> Option<Money> {
        checked_monthly_interest(self.original_principal, self.annual_rate)
    }

    fn method(&self) -> InterestMethod {
        InterestMethod::FixedRate
    }
}
