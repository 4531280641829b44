pub mod account;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod ledger;
pub mod payments;
pub mod types;

// re-export key types
pub use account::{DebtAccount, DebtAccountBuilder};
pub use config::{DebtTypeConfig, RatePolicyRegistry, RateValidation, ScheduleOptions};
pub use decimal::{Money, Rate};
pub use errors::{DebtError, Result};
pub use events::{EventStore, LedgerEvent};
pub use interest::{
    calculate_min_payment, calculate_monthly_payment, daily_accrual, daily_interest, days_between,
    days_in_month, fixed_rate_monthly, reducing_balance_monthly, strategy_for, BillingPeriod,
    PeriodInterest,
};
pub use ledger::{DebtLedger, DebtSummary, NewDebt};
pub use payments::{
    allocate_payment, compare_payments, generate_amortization_schedule, generate_credit_card_schedule,
    generate_daily_accrual_schedule, generate_fixed_rate_schedule, generate_for_debt, ComparisonRequest,
    ComparisonResult, PaymentAllocation, PaymentRecord, PaymentRule, Savings, ScheduleEntry,
    ScheduleGenerator, ScheduleResult, ScheduleSummary,
};
pub use types::{DebtId, DebtStatus, DebtType, InterestMethod};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
