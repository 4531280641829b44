/// compare strategies - what an extra payment saves
use debt_amortization_rs::chrono::NaiveDate;
use debt_amortization_rs::{
    compare_payments, ComparisonRequest, DebtType, Money, Rate, RatePolicyRegistry, ScheduleOptions,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== compare strategies ===\n");

    let registry = RatePolicyRegistry::bot_defaults();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    for debt_type in DebtType::ALL {
        let request = ComparisonRequest {
            principal: Money::from_major(200_000),
            annual_rate: Rate::from_percentage(15),
            min_payment: Money::from_major(6_000),
            extra_payment: Money::from_major(2_000),
            debt_type,
            start_date: start,
            interest_method: None,
            original_principal: None,
        };
        let result = compare_payments(&request, &registry, ScheduleOptions::default())?;

        println!("{}", registry.get_config(debt_type).label);
        println!(
            "  {} / month: {} months, {} interest{}",
            result.minimum.payment,
            result.minimum.total_months,
            result.minimum.total_interest,
            if result.minimum.capped { " (never paid off)" } else { "" }
        );
        println!(
            "  {} / month: {} months, {} interest",
            result.accelerated.payment, result.accelerated.total_months, result.accelerated.total_interest
        );
        println!(
            "  saves {} months and {} interest\n",
            result.savings.months, result.savings.interest
        );
    }

    Ok(())
}
