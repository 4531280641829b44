use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::account::DebtAccount;
use crate::config::{DebtTypeConfig, RatePolicyRegistry, ScheduleOptions};
use crate::decimal::{Money, Rate};
use crate::errors::{ensure_non_negative, DebtError, Result};
use crate::interest::{
    calculate_min_payment, calculate_monthly_payment, strategy_for, BillingCursor, BillingPeriod,
    DailyAccrualInterest, FixedRateInterest, PeriodInterest, ReducingBalanceInterest,
};
use crate::types::{DebtType, InterestMethod};

/// one projected period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub month: u32,
    /// calendar period, present for date-tracked schedules
    pub period: Option<BillingPeriod>,
    pub payment: Money,
    pub interest: Money,
    /// negative when the payment does not cover the period's interest
    pub principal: Money,
    pub balance: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    /// minimum due next period on the new balance (credit card schedules)
    pub next_min_payment: Option<Money>,
}

/// projected payoff timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub method: InterestMethod,
    pub schedule: Vec<ScheduleEntry>,
    pub total_months: u32,
    pub total_interest: Money,
    pub total_paid: Money,
    pub final_balance: Money,
    pub max_months: u32,
}

impl ScheduleResult {
    /// stopped at the month cap with debt still outstanding
    pub fn is_capped(&self) -> bool {
        self.total_months == self.max_months && !self.final_balance.is_settled()
    }

    pub fn entry(&self, month: u32) -> Option<&ScheduleEntry> {
        month
            .checked_sub(1)
            .and_then(|index| self.schedule.get(index as usize))
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// how each period's payment is chosen
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentRule {
    /// same amount every period
    Fixed(Money),
    /// minimum payment recomputed each period on balance plus interest
    Minimum(DebtTypeConfig),
    /// recomputed minimum with a fixed amount on top
    MinimumPlus { policy: DebtTypeConfig, extra: Money },
}

impl PaymentRule {
    fn requested(&self, owed: Money) -> Money {
        match self {
            PaymentRule::Fixed(amount) => *amount,
            PaymentRule::Minimum(policy) => calculate_min_payment(owed, policy),
            PaymentRule::MinimumPlus { policy, extra } => calculate_min_payment(owed, policy)
                .checked_add(*extra)
                .unwrap_or(owed),
        }
    }
}

/// generic month-by-month payoff simulator
pub struct ScheduleGenerator {
    interest: Box<dyn PeriodInterest>,
    rule: PaymentRule,
    cursor: Option<BillingCursor>,
    /// policy used to report the next period's minimum payment
    min_payment_display: Option<DebtTypeConfig>,
    options: ScheduleOptions,
}

impl ScheduleGenerator {
    pub fn new(interest: Box<dyn PeriodInterest>, rule: PaymentRule, options: ScheduleOptions) -> Self {
        Self {
            interest,
            rule,
            cursor: None,
            min_payment_display: None,
            options,
        }
    }

    /// track calendar months starting at the month of `start_date`
    pub fn with_calendar(mut self, start_date: NaiveDate) -> Self {
        self.cursor = Some(BillingCursor::starting_at(start_date));
        self
    }

    /// expose next period's minimum payment on every entry
    pub fn with_min_payment_display(mut self, policy: DebtTypeConfig) -> Self {
        self.min_payment_display = Some(policy);
        self
    }

    /// run until the balance is paid off or the month cap is reached
    ///
    /// fails with `CalculationError` when a growing balance leaves the decimal range
    pub fn run(mut self, principal: Money) -> Result<ScheduleResult> {
        let threshold = self.options.paid_threshold;
        let max_months = self.options.max_months;

        let mut schedule = Vec::new();
        let mut balance = principal;
        let mut month = 0;
        let mut total_interest = Money::ZERO;
        let mut total_paid = Money::ZERO;

        while balance > threshold && month < max_months {
            month += 1;
            let period = self.cursor.map(|c| c.current());

            let interest = self
                .interest
                .period_interest(balance, period.as_ref())
                .ok_or_else(|| overflow(month))?;
            let owed = balance.checked_add(interest).ok_or_else(|| overflow(month))?;
            let payment = self.rule.requested(owed).min(owed);
            let principal_part = payment - interest;

            balance = (balance - principal_part).max(Money::ZERO);
            total_interest = total_interest.checked_add(interest).ok_or_else(|| overflow(month))?;
            total_paid = total_paid.checked_add(payment).ok_or_else(|| overflow(month))?;

            let next_min_payment = self
                .min_payment_display
                .as_ref()
                .map(|policy| calculate_min_payment(balance, policy).to_output());

            schedule.push(ScheduleEntry {
                month,
                period,
                payment: payment.to_output(),
                interest: interest.to_output(),
                principal: principal_part.to_output(),
                balance: balance.to_output(),
                total_interest: total_interest.to_output(),
                total_paid: total_paid.to_output(),
                next_min_payment,
            });

            if let Some(cursor) = self.cursor.as_mut() {
                cursor.advance();
            }
        }

        if balance > threshold {
            debug!(
                method = ?self.interest.method(),
                max_months,
                remaining = %balance.to_output(),
                "schedule reached month cap without payoff"
            );
        }

        Ok(ScheduleResult {
            method: self.interest.method(),
            schedule,
            total_months: month,
            total_interest: total_interest.to_output(),
            total_paid: total_paid.to_output(),
            final_balance: balance.to_output(),
            max_months,
        })
    }
}

fn overflow(month: u32) -> DebtError {
    DebtError::CalculationError {
        message: format!("schedule balance overflowed at month {}", month),
    }
}

pub(crate) fn validate_inputs(principal: Money, annual_rate: Rate, payment: Money) -> Result<()> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative("payment", payment)?;
    if annual_rate.is_negative() {
        return Err(DebtError::invalid("annual_rate", annual_rate));
    }
    Ok(())
}

/// reducing-balance schedule with a fixed monthly payment
pub fn generate_amortization_schedule(
    principal: Money,
    annual_rate: Rate,
    monthly_payment: Money,
    options: ScheduleOptions,
) -> Result<ScheduleResult> {
    validate_inputs(principal, annual_rate, monthly_payment)?;

    ScheduleGenerator::new(
        Box::new(ReducingBalanceInterest::new(annual_rate)),
        PaymentRule::Fixed(monthly_payment),
        options,
    )
    .run(principal)
}

/// daily-accrual schedule charging the actual days of each calendar month
pub fn generate_daily_accrual_schedule(
    principal: Money,
    annual_rate: Rate,
    monthly_payment: Money,
    start_date: NaiveDate,
    options: ScheduleOptions,
) -> Result<ScheduleResult> {
    validate_inputs(principal, annual_rate, monthly_payment)?;

    ScheduleGenerator::new(
        Box::new(DailyAccrualInterest::new(annual_rate)),
        PaymentRule::Fixed(monthly_payment),
        options,
    )
    .with_calendar(start_date)
    .run(principal)
}

/// flat-rate schedule; every period's interest is taken on `principal`
pub fn generate_fixed_rate_schedule(
    principal: Money,
    annual_rate: Rate,
    monthly_payment: Money,
    options: ScheduleOptions,
) -> Result<ScheduleResult> {
    validate_inputs(principal, annual_rate, monthly_payment)?;

    ScheduleGenerator::new(
        Box::new(FixedRateInterest::new(principal, annual_rate)),
        PaymentRule::Fixed(monthly_payment),
        options,
    )
    .run(principal)
}

/// credit card schedule: daily accrual, minimum payment when no positive amount is given
pub fn generate_credit_card_schedule(
    principal: Money,
    annual_rate: Rate,
    payment: Option<Money>,
    start_date: NaiveDate,
    policy: &DebtTypeConfig,
    options: ScheduleOptions,
) -> Result<ScheduleResult> {
    let rule = match payment.filter(|p| p.is_positive()) {
        Some(amount) => PaymentRule::Fixed(amount),
        None => PaymentRule::Minimum(policy.clone()),
    };
    generate_credit_card_schedule_with_rule(principal, annual_rate, rule, start_date, policy, options)
}

/// credit card schedule under an explicit payment rule
pub fn generate_credit_card_schedule_with_rule(
    principal: Money,
    annual_rate: Rate,
    rule: PaymentRule,
    start_date: NaiveDate,
    policy: &DebtTypeConfig,
    options: ScheduleOptions,
) -> Result<ScheduleResult> {
    let payment = match &rule {
        PaymentRule::Fixed(amount) => *amount,
        PaymentRule::Minimum(_) => Money::ZERO,
        PaymentRule::MinimumPlus { extra, .. } => *extra,
    };
    validate_inputs(principal, annual_rate, payment)?;

    ScheduleGenerator::new(Box::new(DailyAccrualInterest::new(annual_rate)), rule, options)
        .with_calendar(start_date)
        .with_min_payment_display(policy.clone())
        .run(principal)
}

/// project a tracked debt from its current balance
///
/// the payment defaults to the debt's configured monthly payment, then to the
/// level payment over its term; revolving debts fall back to the minimum rule
pub fn generate_for_debt(
    debt: &DebtAccount,
    payment: Option<Money>,
    as_of: NaiveDate,
    registry: &RatePolicyRegistry,
    options: ScheduleOptions,
) -> Result<ScheduleResult> {
    let payment = payment.or(debt.monthly_payment).filter(|p| p.is_positive());
    let balance = debt.current_balance;

    if debt.debt_type.is_revolving() {
        return generate_credit_card_schedule(
            balance,
            debt.annual_rate,
            payment,
            as_of,
            registry.get_config(DebtType::CreditCard),
            options,
        );
    }

    let payment = match (payment, debt.term_months) {
        (Some(amount), _) => amount,
        (None, Some(term)) => calculate_monthly_payment(balance, debt.annual_rate, term)?,
        (None, None) => return Err(DebtError::invalid("monthly_payment", "missing")),
    };
    validate_inputs(balance, debt.annual_rate, payment)?;

    let generator = ScheduleGenerator::new(
        strategy_for(debt.interest_method, debt.principal, debt.annual_rate),
        PaymentRule::Fixed(payment),
        options,
    );
    let generator = match debt.interest_method {
        InterestMethod::DailyAccrual => generator.with_calendar(as_of),
        InterestMethod::ReducingBalance | InterestMethod::FixedRate => generator,
    };

    generator.run(balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interest::{daily_accrual, fixed_rate_monthly};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_conserved(result: &ScheduleResult) {
        for entry in &result.schedule {
            let diff = (entry.interest + entry.principal - entry.payment).abs();
            assert!(diff <= Money::CENT, "month {} not conserved", entry.month);
        }
    }

    #[test]
    fn test_amortization_pays_off() {
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(12);
        let payment = calculate_monthly_payment(principal, rate, 12).unwrap();

        let result = generate_amortization_schedule(principal, rate, payment, ScheduleOptions::default()).unwrap();

        assert_eq!(result.total_months, 12);
        assert!(!result.is_capped());
        assert!(result.final_balance.is_settled());
        assert_eq!(result.schedule[0].interest, Money::from_major(1_000));
        assert!(result.schedule[0].period.is_none());
        assert!(result.total_interest > Money::from_major(6_600));
        assert!(result.total_interest < Money::from_major(6_700));
        assert_conserved(&result);
    }

    #[test]
    fn test_amortization_balance_strictly_decreases() {
        let result = generate_amortization_schedule(
            Money::from_major(50_000),
            Rate::from_percentage(18),
            Money::from_major(2_000),
            ScheduleOptions::default(),
        )
        .unwrap();

        let mut previous = Money::from_major(50_000);
        for entry in &result.schedule {
            assert!(entry.balance < previous);
            previous = entry.balance;
        }
        assert_eq!(previous, Money::ZERO);
    }

    #[test]
    fn test_final_payment_is_clamped() {
        let result = generate_amortization_schedule(
            Money::from_major(1_000),
            Rate::ZERO,
            Money::from_major(300),
            ScheduleOptions::default(),
        )
        .unwrap();

        assert_eq!(result.total_months, 4);
        assert_eq!(result.schedule[3].payment, Money::from_major(100));
        assert_eq!(result.total_paid, Money::from_major(1_000));
        assert_eq!(result.total_interest, Money::ZERO);
    }

    #[test]
    fn test_zero_principal_produces_empty_schedule() {
        let result = generate_amortization_schedule(
            Money::ZERO,
            Rate::from_percentage(10),
            Money::from_major(100),
            ScheduleOptions::default(),
        )
        .unwrap();

        assert!(result.schedule.is_empty());
        assert_eq!(result.total_months, 0);
        assert!(!result.is_capped());
    }

    #[test]
    fn test_non_converging_schedule_is_capped() {
        // 2% monthly interest on 10,000 is 200; paying 100 never catches up
        let result = generate_amortization_schedule(
            Money::from_major(10_000),
            Rate::from_percentage(24),
            Money::from_major(100),
            ScheduleOptions::default(),
        )
        .unwrap();

        assert_eq!(result.schedule.len(), 600);
        assert_eq!(result.total_months, 600);
        assert!(result.is_capped());
        assert!(result.final_balance > Money::from_major(10_000));
        assert!(result.schedule[0].principal.is_negative());
    }

    #[test]
    fn test_custom_cap() {
        let result = generate_daily_accrual_schedule(
            Money::from_major(10_000),
            Rate::from_percentage(20),
            Money::ZERO,
            date(2024, 1, 1),
            ScheduleOptions::with_max_months(24),
        )
        .unwrap();

        assert_eq!(result.schedule.len(), 24);
        assert!(result.is_capped());
    }

    #[test]
    fn test_daily_accrual_uses_calendar_days() {
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(18);

        let result = generate_daily_accrual_schedule(
            principal,
            rate,
            Money::from_major(1_000),
            date(2024, 1, 15),
            ScheduleOptions::default(),
        )
        .unwrap();

        let jan = &result.schedule[0];
        let period = jan.period.unwrap();
        assert_eq!(period.label(), "2024-01");
        assert_eq!(period.days, 31);
        assert_eq!(jan.interest, daily_accrual(principal, rate, 31).to_output());

        let feb = result.schedule[1].period.unwrap();
        assert_eq!((feb.label(), feb.days), ("2024-02".to_string(), 29));

        let mut previous = principal;
        for entry in &result.schedule {
            assert!(entry.balance < previous);
            previous = entry.balance;
        }
        assert_conserved(&result);
    }

    #[test]
    fn test_daily_accrual_crosses_year_end() {
        let result = generate_daily_accrual_schedule(
            Money::from_major(5_000),
            Rate::from_percentage(12),
            Money::from_major(1_000),
            date(2023, 11, 30),
            ScheduleOptions::default(),
        )
        .unwrap();

        let labels: Vec<String> = result
            .schedule
            .iter()
            .take(3)
            .map(|e| e.period.unwrap().label())
            .collect();
        assert_eq!(labels, vec!["2023-11", "2023-12", "2024-01"]);
    }

    #[test]
    fn test_fixed_rate_interest_constant() {
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(12);

        let result =
            generate_fixed_rate_schedule(principal, rate, Money::from_major(5_000), ScheduleOptions::default())
                .unwrap();

        let first = result.entry(1).unwrap();
        let tenth = result.entry(10).unwrap();
        assert_eq!(first.interest, Money::from_major(1_000));
        assert_eq!(tenth.interest, first.interest);
        assert!(tenth.balance < first.balance);
        assert_eq!(first.interest, fixed_rate_monthly(principal, rate).to_output());

        // the reducing-balance schedule charges less once the balance falls
        let reducing =
            generate_amortization_schedule(principal, rate, Money::from_major(5_000), ScheduleOptions::default())
                .unwrap();
        assert!(reducing.entry(10).unwrap().interest < tenth.interest);
        assert!(reducing.total_interest < result.total_interest);
        assert_conserved(&result);
    }

    #[test]
    fn test_credit_card_minimum_payments() {
        let registry = RatePolicyRegistry::bot_defaults();
        let policy = registry.get_config(DebtType::CreditCard);
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(16);

        let result = generate_credit_card_schedule(
            principal,
            rate,
            None,
            date(2024, 3, 1),
            policy,
            ScheduleOptions::default(),
        )
        .unwrap();

        let first = &result.schedule[0];
        let interest = daily_accrual(principal, rate, 31);
        let expected_payment = calculate_min_payment(principal + interest, policy);
        assert_eq!(first.payment, expected_payment.to_output());
        assert_eq!(
            first.next_min_payment,
            Some(calculate_min_payment(principal + interest - expected_payment, policy).to_output())
        );

        // minimum payments shrink as the balance shrinks
        assert!(result.schedule[5].payment < first.payment);
        assert!(!result.is_capped());
        assert!(result.final_balance.is_settled());
        assert_eq!(result.schedule.last().unwrap().next_min_payment, Some(Money::ZERO));
        assert_conserved(&result);
    }

    #[test]
    fn test_credit_card_fixed_payment() {
        let registry = RatePolicyRegistry::bot_defaults();
        let policy = registry.get_config(DebtType::CreditCard);

        let fixed = generate_credit_card_schedule(
            Money::from_major(10_000),
            Rate::from_percentage(16),
            Some(Money::from_major(1_500)),
            date(2024, 3, 1),
            policy,
            ScheduleOptions::default(),
        )
        .unwrap();
        assert_eq!(fixed.schedule[0].payment, Money::from_major(1_500));
        assert!(fixed.schedule[0].next_min_payment.is_some());

        // a zero amount means "pay the minimum"
        let zero = generate_credit_card_schedule(
            Money::from_major(10_000),
            Rate::from_percentage(16),
            Some(Money::ZERO),
            date(2024, 3, 1),
            policy,
            ScheduleOptions::default(),
        )
        .unwrap();
        assert!(zero.total_months > fixed.total_months);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let err = generate_amortization_schedule(
            Money::from_major(-5),
            Rate::from_percentage(10),
            Money::from_major(100),
            ScheduleOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DebtError::InvalidInput { field: "principal", .. }));

        let err = generate_fixed_rate_schedule(
            Money::from_major(5_000),
            Rate::from_decimal(dec!(-0.01)),
            Money::from_major(100),
            ScheduleOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DebtError::InvalidInput { field: "annual_rate", .. }));

        let err = generate_daily_accrual_schedule(
            Money::from_major(5_000),
            Rate::from_percentage(10),
            Money::from_major(-100),
            date(2024, 1, 1),
            ScheduleOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DebtError::InvalidInput { field: "payment", .. }));
    }

    #[test]
    fn test_json_output() {
        let result = generate_amortization_schedule(
            Money::from_major(1_000),
            Rate::from_percentage(12),
            Money::from_major(500),
            ScheduleOptions::default(),
        )
        .unwrap();
        let json = result.to_json_pretty().unwrap();
        assert!(json.contains("\"total_months\": 3"));
        assert!(json.contains("\"reducing_balance\""));
    }

    #[test]
    fn test_runaway_balance_reports_overflow() {
        // 200% a year with nothing paid leaves the decimal range well before 600 months
        let err = generate_amortization_schedule(
            Money::from_major(10_000),
            Rate::from_percentage(200),
            Money::ZERO,
            ScheduleOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DebtError::CalculationError { .. }));

        let err = generate_daily_accrual_schedule(
            Money::from_major(10_000),
            Rate::from_percentage(200),
            Money::ZERO,
            date(2024, 1, 1),
            ScheduleOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DebtError::CalculationError { .. }));

        // the same rate under a short cap is still plain data
        let capped = generate_amortization_schedule(
            Money::from_major(10_000),
            Rate::from_percentage(200),
            Money::ZERO,
            ScheduleOptions::with_max_months(24),
        )
        .unwrap();
        assert!(capped.is_capped());
    }

    #[test]
    fn test_minimum_plus_extra_beats_minimum() {
        let registry = RatePolicyRegistry::bot_defaults();
        let policy = registry.get_config(DebtType::CreditCard);
        let principal = Money::from_major(20_000);
        let rate = Rate::from_percentage(16);
        let start = date(2024, 1, 1);

        let minimum = generate_credit_card_schedule(principal, rate, None, start, policy, ScheduleOptions::default())
            .unwrap();
        let plus = generate_credit_card_schedule_with_rule(
            principal,
            rate,
            PaymentRule::MinimumPlus {
                policy: policy.clone(),
                extra: Money::from_major(300),
            },
            start,
            policy,
            ScheduleOptions::default(),
        )
        .unwrap();

        assert_eq!(plus.schedule[0].payment, minimum.schedule[0].payment + Money::from_major(300));
        assert!(plus.total_months <= minimum.total_months);
        assert!(plus.total_interest < minimum.total_interest);
        assert!(!plus.is_capped());
        assert_conserved(&plus);
    }

    #[test]
    fn test_generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScheduleGenerator>();
        assert_send_sync::<ScheduleResult>();
    }
}
