pub mod allocation;
pub mod amortization;
pub mod comparison;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::DebtId;

pub use allocation::allocate_payment;
pub use amortization::{
    generate_amortization_schedule, generate_credit_card_schedule, generate_credit_card_schedule_with_rule,
    generate_daily_accrual_schedule, generate_fixed_rate_schedule, generate_for_debt, PaymentRule, ScheduleEntry,
    ScheduleGenerator, ScheduleResult,
};
pub use comparison::{compare_payments, ComparisonRequest, ComparisonResult, Savings, ScheduleSummary};

/// split of one payment between interest and principal, not yet applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAllocation {
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub updated_balance: Money,
    /// unpaid interest carried to the next payment (daily accrual only)
    pub updated_accrued_interest: Money,
    /// days of interest accrued for this payment (daily accrual only)
    pub days_accrued: u32,
    pub paid_off: bool,
}

/// recorded payment event, append-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub debt_id: DebtId,
    pub date: NaiveDate,
    pub amount: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub balance_after: Money,
    pub note: String,
}

impl PaymentRecord {
    /// true when the payment covered interest only
    pub fn is_interest_only(&self) -> bool {
        self.principal_portion.is_zero()
    }
}
