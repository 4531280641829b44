pub mod accrual;
pub mod amortizing;
pub mod minimum;

use crate::decimal::{Money, Rate};
use crate::types::InterestMethod;

pub use accrual::{
    checked_daily_accrual, daily_accrual, daily_interest, days_between, days_in_month, BillingCursor, BillingPeriod,
    DailyAccrualInterest,
};
pub use amortizing::{
    calculate_monthly_payment, checked_monthly_interest, fixed_rate_monthly, reducing_balance_monthly, FixedRateInterest,
    ReducingBalanceInterest,
};
pub use minimum::calculate_min_payment;

/// per-period interest strategy driving the schedule loop
pub trait PeriodInterest: Send + Sync {
    /// interest charged for one period on the opening balance, `None` on decimal overflow
    fn period_interest(&self, balance: Money, period: Option<&BillingPeriod>) -> Option<Money>;

    fn method(&self) -> InterestMethod;
}

/// interest strategy for a method
///
/// `original_principal` is only read by the flat-rate method
pub fn strategy_for(
    method: InterestMethod,
    original_principal: Money,
    annual_rate: Rate,
) -> Box<dyn PeriodInterest> {
    match method {
        InterestMethod::ReducingBalance => Box::new(ReducingBalanceInterest::new(annual_rate)),
        InterestMethod::DailyAccrual => Box::new(DailyAccrualInterest::new(annual_rate)),
        InterestMethod::FixedRate => Box::new(FixedRateInterest::new(original_principal, annual_rate)),
    }
}
