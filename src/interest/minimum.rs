use crate::config::DebtTypeConfig;
use crate::decimal::Money;

/// minimum payment for revolving credit: max(balance x pct, floor),
/// or the whole balance once it is at or under the floor
///
/// returns zero for policies without a percentage rule
pub fn calculate_min_payment(balance: Money, config: &DebtTypeConfig) -> Money {
    let Some(percent) = config.min_payment_percent else {
        return Money::ZERO;
    };
    let balance = balance.max(Money::ZERO);
    let floor = config.min_payment_floor.unwrap_or(Money::ZERO);

    if balance <= floor {
        return balance;
    }

    balance.percentage(percent).max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RatePolicyRegistry;
    use crate::types::DebtType;

    #[test]
    fn test_balance_under_floor_pays_in_full() {
        let registry = RatePolicyRegistry::bot_defaults();
        let min = registry.min_payment(Money::from_major(150), DebtType::CreditCard);
        assert_eq!(min, Money::from_major(150));
    }

    #[test]
    fn test_percentage_rule() {
        let registry = RatePolicyRegistry::bot_defaults();
        let min = registry.min_payment(Money::from_major(10_000), DebtType::CreditCard);
        assert_eq!(min, Money::from_major(800));
    }

    #[test]
    fn test_floor_applies_between() {
        let registry = RatePolicyRegistry::bot_defaults();
        // 8% of 1,000 is 80, below the 200 floor
        let min = registry.min_payment(Money::from_major(1_000), DebtType::CreditCard);
        assert_eq!(min, Money::from_major(200));
    }

    #[test]
    fn test_non_revolving_has_no_minimum() {
        let registry = RatePolicyRegistry::bot_defaults();
        assert_eq!(registry.min_payment(Money::from_major(10_000), DebtType::PersonalLoan), Money::ZERO);
        assert_eq!(registry.min_payment(Money::from_major(10_000), DebtType::FixedRate), Money::ZERO);
    }
}
