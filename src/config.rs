use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::decimal::{Money, Rate};
use crate::errors::{DebtError, Result};
use crate::interest::minimum::calculate_min_payment;
use crate::types::{DebtType, InterestMethod};

/// regulatory and contractual policy for one debt type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtTypeConfig {
    /// regulatory ceiling on the annual rate
    pub max_annual_rate: Rate,
    pub method: InterestMethod,
    /// minimum payment as a percentage of the balance (revolving credit only)
    pub min_payment_percent: Option<Decimal>,
    /// absolute floor for the minimum payment
    pub min_payment_floor: Option<Money>,
    pub label: String,
    pub description: String,
}

impl DebtTypeConfig {
    /// revolving credit card: daily accrual, percentage minimum with a floor
    pub fn credit_card(max_rate: Rate, min_percent: Decimal, floor: Money) -> Self {
        Self {
            max_annual_rate: max_rate,
            method: InterestMethod::DailyAccrual,
            min_payment_percent: Some(min_percent),
            min_payment_floor: Some(floor),
            label: "Credit card".to_string(),
            description: "daily interest: outstanding balance x (rate / 365)".to_string(),
        }
    }

    /// amortizing loan charged on the reducing balance
    pub fn reducing_balance(max_rate: Rate, label: &str) -> Self {
        Self {
            max_annual_rate: max_rate,
            method: InterestMethod::ReducingBalance,
            min_payment_percent: None,
            min_payment_floor: None,
            label: label.to_string(),
            description: "reducing balance: outstanding balance x (rate / 12)".to_string(),
        }
    }

    /// flat-rate loan charged on the original principal
    pub fn flat_rate(max_rate: Rate) -> Self {
        Self {
            max_annual_rate: max_rate,
            method: InterestMethod::FixedRate,
            min_payment_percent: None,
            min_payment_floor: None,
            label: "Fixed rate (flat)".to_string(),
            description: "flat rate: original principal x (rate / 12) for the whole term".to_string(),
        }
    }

    pub fn has_minimum_payment(&self) -> bool {
        self.min_payment_percent.is_some()
    }
}

/// outcome of checking a rate against the ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateValidation {
    pub is_over_limit: bool,
    pub max_rate: Rate,
    pub current_rate: Rate,
    pub message: String,
}

/// immutable table of debt-type policies, injected into the engine
#[derive(Debug, Clone, PartialEq)]
pub struct RatePolicyRegistry {
    policies: BTreeMap<DebtType, DebtTypeConfig>,
}

impl RatePolicyRegistry {
    /// fallback entry for unknown or missing debt types
    pub const FALLBACK: DebtType = DebtType::PersonalLoan;

    /// build from an explicit table; the fallback entry is required
    pub fn new(policies: BTreeMap<DebtType, DebtTypeConfig>) -> Result<Self> {
        if !policies.contains_key(&Self::FALLBACK) {
            return Err(DebtError::InvalidConfiguration {
                message: format!("missing fallback policy '{}'", Self::FALLBACK),
            });
        }
        for (debt_type, config) in &policies {
            if config.max_annual_rate.is_negative() {
                return Err(DebtError::InvalidConfiguration {
                    message: format!("negative ceiling for '{}'", debt_type),
                });
            }
        }
        Ok(Self { policies })
    }

    /// consumer-lending ceilings published by the Bank of Thailand
    pub fn bot_defaults() -> Self {
        let mut policies = BTreeMap::new();
        policies.insert(
            DebtType::CreditCard,
            DebtTypeConfig::credit_card(Rate::from_percentage(16), dec!(8), Money::from_major(200)),
        );
        policies.insert(
            DebtType::PersonalLoan,
            DebtTypeConfig::reducing_balance(Rate::from_percentage(25), "Personal loan"),
        );
        policies.insert(
            DebtType::PersonalLoanVehicle,
            DebtTypeConfig::reducing_balance(
                Rate::from_percentage(24),
                "Personal loan (vehicle registration)",
            ),
        );
        policies.insert(DebtType::FixedRate, DebtTypeConfig::flat_rate(Rate::from_percentage(25)));
        Self { policies }
    }

    /// load a policy table from json
    pub fn from_json_str(json: &str) -> Result<Self> {
        let policies: BTreeMap<DebtType, DebtTypeConfig> =
            serde_json::from_str(json).map_err(|e| DebtError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        Self::new(policies)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.policies)
    }

    /// policy for a debt type, falling back to personal loan
    pub fn get_config(&self, debt_type: DebtType) -> &DebtTypeConfig {
        self.policies
            .get(&debt_type)
            .unwrap_or_else(|| &self.policies[&Self::FALLBACK])
    }

    /// policy for a snake_case tag; unrecognized tags fall back to personal loan
    pub fn get_config_by_name(&self, name: &str) -> &DebtTypeConfig {
        match name.parse::<DebtType>() {
            Ok(debt_type) => self.get_config(debt_type),
            Err(_) => self.get_config(Self::FALLBACK),
        }
    }

    /// compare a rate against the ceiling; at-ceiling is within the limit
    pub fn validate_rate(&self, rate: Rate, debt_type: DebtType) -> RateValidation {
        let max_rate = self.get_config(debt_type).max_annual_rate;
        let is_over_limit = rate > max_rate;
        let message = if is_over_limit {
            format!("interest rate {} exceeds the regulatory ceiling (max {})", rate, max_rate)
        } else {
            format!("interest rate {} is within the regulatory ceiling (max {})", rate, max_rate)
        };

        RateValidation {
            is_over_limit,
            max_rate,
            current_rate: rate,
            message,
        }
    }

    /// minimum payment for a balance under the type's policy
    pub fn min_payment(&self, balance: Money, debt_type: DebtType) -> Money {
        calculate_min_payment(balance, self.get_config(debt_type))
    }
}

impl Default for RatePolicyRegistry {
    fn default() -> Self {
        Self::bot_defaults()
    }
}

/// knobs for the schedule generators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    /// hard cap on projected periods
    pub max_months: u32,
    /// balance at or below this counts as paid off
    pub paid_threshold: Money,
}

impl ScheduleOptions {
    pub const DEFAULT_MAX_MONTHS: u32 = 600;

    pub fn with_max_months(max_months: u32) -> Self {
        Self {
            max_months,
            ..Self::default()
        }
    }
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            max_months: Self::DEFAULT_MAX_MONTHS,
            paid_threshold: Money::CENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let registry = RatePolicyRegistry::bot_defaults();

        let card = registry.get_config(DebtType::CreditCard);
        assert_eq!(card.max_annual_rate, Rate::from_percentage(16));
        assert_eq!(card.method, InterestMethod::DailyAccrual);
        assert_eq!(card.min_payment_percent, Some(dec!(8)));
        assert_eq!(card.min_payment_floor, Some(Money::from_major(200)));

        let vehicle = registry.get_config(DebtType::PersonalLoanVehicle);
        assert_eq!(vehicle.max_annual_rate, Rate::from_percentage(24));
        assert_eq!(vehicle.method, InterestMethod::ReducingBalance);

        assert_eq!(registry.get_config(DebtType::FixedRate).method, InterestMethod::FixedRate);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let registry = RatePolicyRegistry::bot_defaults();
        let first = registry.get_config(DebtType::CreditCard).clone();
        let second = registry.get_config(DebtType::CreditCard).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let registry = RatePolicyRegistry::bot_defaults();
        let fallback = registry.get_config_by_name("mortgage");
        assert_eq!(fallback, registry.get_config(DebtType::PersonalLoan));
        assert_eq!(
            registry.get_config_by_name("credit_card"),
            registry.get_config(DebtType::CreditCard)
        );
    }

    #[test]
    fn test_missing_entry_falls_back() {
        let mut policies = BTreeMap::new();
        policies.insert(
            DebtType::PersonalLoan,
            DebtTypeConfig::reducing_balance(Rate::from_percentage(20), "Loan"),
        );
        let registry = RatePolicyRegistry::new(policies).unwrap();
        let card = registry.get_config(DebtType::CreditCard);
        assert_eq!(card.max_annual_rate, Rate::from_percentage(20));
        assert!(!card.has_minimum_payment());
    }

    #[test]
    fn test_rate_ceiling_boundary() {
        let registry = RatePolicyRegistry::bot_defaults();

        let at_ceiling = registry.validate_rate(Rate::from_percentage(16), DebtType::CreditCard);
        assert!(!at_ceiling.is_over_limit);
        assert_eq!(at_ceiling.max_rate, Rate::from_percentage(16));
        assert!(at_ceiling.message.contains("within"));

        let over = registry.validate_rate(Rate::from_percent(dec!(16.01)), DebtType::CreditCard);
        assert!(over.is_over_limit);
        assert!(over.message.contains("16.01%"));
        assert!(over.message.contains("exceeds"));
    }

    #[test]
    fn test_json_roundtrip_and_fallback_requirement() {
        let registry = RatePolicyRegistry::bot_defaults();
        let json = registry.to_json_pretty().unwrap();
        let loaded = RatePolicyRegistry::from_json_str(&json).unwrap();
        assert_eq!(loaded, registry);

        let err = RatePolicyRegistry::from_json_str("{}").unwrap_err();
        assert!(matches!(err, DebtError::InvalidConfiguration { .. }));

        let err = RatePolicyRegistry::from_json_str("not json").unwrap_err();
        assert!(matches!(err, DebtError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_schedule_options_default() {
        let options = ScheduleOptions::default();
        assert_eq!(options.max_months, 600);
        assert_eq!(options.paid_threshold, Money::CENT);
        assert_eq!(ScheduleOptions::with_max_months(12).max_months, 12);
    }
}
