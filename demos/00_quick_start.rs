/// quick start - project a loan payoff and split one payment
use debt_amortization_rs::chrono::NaiveDate;
use debt_amortization_rs::{
    allocate_payment, calculate_monthly_payment, generate_amortization_schedule, DebtAccount, DebtType,
    Money, Rate, RatePolicyRegistry, ScheduleOptions,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = RatePolicyRegistry::bot_defaults();

    // 100,000 personal loan at 12% over a year
    let principal = Money::from_major(100_000);
    let rate = Rate::from_percentage(12);
    let payment = calculate_monthly_payment(principal, rate, 12)?;
    println!("level payment: {}", payment.to_output());

    let schedule = generate_amortization_schedule(principal, rate, payment, ScheduleOptions::default())?;
    println!(
        "paid off in {} months, interest {}, total {}",
        schedule.total_months, schedule.total_interest, schedule.total_paid
    );

    // split the first payment
    let debt = DebtAccount::builder()
        .name("Personal loan")
        .debt_type(DebtType::PersonalLoan)
        .principal(principal)
        .rate(rate)
        .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .build(&registry)?;
    let allocation = allocate_payment(&debt, payment, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())?;
    println!(
        "first payment: interest {}, principal {}, balance {}",
        allocation.interest_portion.to_output(),
        allocation.principal_portion.to_output(),
        allocation.updated_balance.to_output()
    );

    Ok(())
}
