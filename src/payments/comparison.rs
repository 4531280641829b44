use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{RatePolicyRegistry, ScheduleOptions};
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::{DebtType, InterestMethod};

use crate::interest::strategy_for;

use super::amortization::{
    generate_credit_card_schedule_with_rule, validate_inputs, PaymentRule, ScheduleGenerator, ScheduleResult,
};

/// inputs for a minimum vs accelerated comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub principal: Money,
    pub annual_rate: Rate,
    /// baseline payment; for credit cards zero means the policy minimum,
    /// and the extra is then added on top of each recomputed minimum
    pub min_payment: Money,
    pub extra_payment: Money,
    pub debt_type: DebtType,
    pub start_date: NaiveDate,
    /// overrides the debt type's method
    #[serde(default)]
    pub interest_method: Option<InterestMethod>,
    /// flat-rate interest base when it differs from `principal`
    #[serde(default)]
    pub original_principal: Option<Money>,
}

/// headline figures of one projected schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub payment: Money,
    pub total_months: u32,
    pub total_interest: Money,
    pub total_paid: Money,
    pub final_balance: Money,
    pub capped: bool,
}

impl ScheduleSummary {
    fn from_result(payment: Money, result: &ScheduleResult) -> Self {
        Self {
            payment: payment.to_output(),
            total_months: result.total_months,
            total_interest: result.total_interest,
            total_paid: result.total_paid,
            final_balance: result.final_balance,
            capped: result.is_capped(),
        }
    }
}

/// baseline minus accelerated; positive means the extra payment saves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    pub months: i64,
    pub interest: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub minimum: ScheduleSummary,
    pub accelerated: ScheduleSummary,
    pub savings: Savings,
}

/// run the debt type's generator at the baseline payment and again with the extra on top
pub fn compare_payments(
    request: &ComparisonRequest,
    registry: &RatePolicyRegistry,
    options: ScheduleOptions,
) -> Result<ComparisonResult> {
    let accelerated_payment = request.min_payment + request.extra_payment;

    let baseline = project(request, request.min_payment, Money::ZERO, registry, options)?;
    let accelerated = project(request, accelerated_payment, request.extra_payment, registry, options)?;

    let savings = Savings {
        months: i64::from(baseline.total_months) - i64::from(accelerated.total_months),
        interest: (baseline.total_interest - accelerated.total_interest).to_output(),
        total: (baseline.total_paid - accelerated.total_paid).to_output(),
    };

    Ok(ComparisonResult {
        minimum: ScheduleSummary::from_result(request.min_payment, &baseline),
        accelerated: ScheduleSummary::from_result(accelerated_payment, &accelerated),
        savings,
    })
}

/// one side of the comparison; `extra` only matters on top of a credit card minimum
fn project(
    request: &ComparisonRequest,
    payment: Money,
    extra: Money,
    registry: &RatePolicyRegistry,
    options: ScheduleOptions,
) -> Result<ScheduleResult> {
    let policy = registry.get_config(request.debt_type);

    if request.debt_type.is_revolving() {
        let rule = if request.min_payment.is_positive() {
            PaymentRule::Fixed(payment)
        } else if extra.is_zero() {
            PaymentRule::Minimum(policy.clone())
        } else {
            PaymentRule::MinimumPlus {
                policy: policy.clone(),
                extra,
            }
        };
        return generate_credit_card_schedule_with_rule(
            request.principal,
            request.annual_rate,
            rule,
            request.start_date,
            policy,
            options,
        );
    }

    validate_inputs(request.principal, request.annual_rate, payment)?;

    let method = request.interest_method.unwrap_or(policy.method);
    let flat_base = request.original_principal.unwrap_or(request.principal);
    let generator = ScheduleGenerator::new(
        strategy_for(method, flat_base, request.annual_rate),
        PaymentRule::Fixed(payment),
        options,
    );
    let generator = match method {
        InterestMethod::DailyAccrual => generator.with_calendar(request.start_date),
        InterestMethod::ReducingBalance | InterestMethod::FixedRate => generator,
    };

    generator.run(request.principal)
}
