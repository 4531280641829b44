/// credit card payoff - daily accrual with the minimum payment rule
use debt_amortization_rs::chrono::NaiveDate;
use debt_amortization_rs::{generate_credit_card_schedule, DebtType, Money, Rate, RatePolicyRegistry, ScheduleOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== credit card payoff ===\n");

    let registry = RatePolicyRegistry::bot_defaults();
    let policy = registry.get_config(DebtType::CreditCard);
    let rate = Rate::from_percentage(16);

    let validation = registry.validate_rate(rate, DebtType::CreditCard);
    println!("{}\n", validation.message);

    let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let minimum = generate_credit_card_schedule(
        Money::from_major(30_000),
        rate,
        None,
        start,
        policy,
        ScheduleOptions::default(),
    )?;

    println!("month  period   days   payment   interest    balance   next min");
    for entry in minimum.schedule.iter().take(12) {
        let (label, days) = entry
            .period
            .map(|p| (p.label(), p.days))
            .unwrap_or_default();
        println!(
            "{:>5}  {}  {:>4}  {:>8}  {:>9}  {:>9}  {:>9}",
            entry.month,
            label,
            days,
            entry.payment,
            entry.interest,
            entry.balance,
            entry.next_min_payment.unwrap_or(Money::ZERO)
        );
    }

    println!(
        "\nminimum payments only: {} months, {} interest",
        minimum.total_months, minimum.total_interest
    );

    let fixed = generate_credit_card_schedule(
        Money::from_major(30_000),
        rate,
        Some(Money::from_major(3_000)),
        start,
        policy,
        ScheduleOptions::default(),
    )?;
    println!("3,000 a month: {} months, {} interest", fixed.total_months, fixed.total_interest);

    Ok(())
}
