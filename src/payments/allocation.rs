use chrono::NaiveDate;

use crate::account::DebtAccount;
use crate::decimal::Money;
use crate::errors::{DebtError, Result};
use crate::interest::{checked_daily_accrual, checked_monthly_interest, days_between};
use crate::types::InterestMethod;

use super::PaymentAllocation;

/// split a payment into interest and principal against the debt's current state
///
/// daily-accrual debts charge interest for the days since `last_interest_date`
/// plus any unpaid carry; other methods charge one month of interest on the
/// current balance. interest is paid first and never exceeds the payment.
pub fn allocate_payment(debt: &DebtAccount, amount: Money, payment_date: NaiveDate) -> Result<PaymentAllocation> {
    if !amount.is_positive() {
        return Err(DebtError::InvalidPaymentAmount { amount });
    }

    let (interest_due, days_accrued) = match debt.interest_method {
        InterestMethod::DailyAccrual => {
            if payment_date < debt.last_interest_date {
                return Err(DebtError::PaymentDateOutOfOrder {
                    last: debt.last_interest_date,
                    payment: payment_date,
                });
            }
            let days = days_between(debt.last_interest_date, payment_date);
            let accrued = checked_daily_accrual(debt.current_balance, debt.annual_rate, days)
                .and_then(|new| debt.accrued_interest.checked_add(new))
                .ok_or_else(|| overflow(debt))?;
            (accrued, days)
        }
        InterestMethod::ReducingBalance | InterestMethod::FixedRate => {
            let interest =
                checked_monthly_interest(debt.current_balance, debt.annual_rate).ok_or_else(|| overflow(debt))?;
            (interest, 0)
        }
    };

    let interest_portion = amount.min(interest_due);
    let principal_portion = amount - interest_portion;
    let updated_balance = (debt.current_balance - principal_portion).max(Money::ZERO);

    let updated_accrued_interest = match debt.interest_method {
        InterestMethod::DailyAccrual => (interest_due - interest_portion).max(Money::ZERO),
        InterestMethod::ReducingBalance | InterestMethod::FixedRate => debt.accrued_interest,
    };

    Ok(PaymentAllocation {
        interest_portion,
        principal_portion,
        updated_balance,
        updated_accrued_interest,
        days_accrued,
        paid_off: updated_balance.is_settled(),
    })
}

fn overflow(debt: &DebtAccount) -> DebtError {
    DebtError::CalculationError {
        message: format!("interest overflow on balance {}", debt.current_balance),
    }
}
