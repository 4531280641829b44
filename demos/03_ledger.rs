/// ledger - track debts and record payments against a controlled clock
use debt_amortization_rs::chrono::{Duration, NaiveDate, TimeZone, Utc};
use debt_amortization_rs::{
    DebtLedger, DebtType, Money, NewDebt, Rate, SafeTimeProvider, ScheduleOptions, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== debt ledger ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();
    let today = time.now().date_naive();

    let mut ledger = DebtLedger::default();
    let card = ledger.add_debt(NewDebt {
        name: "Visa".to_string(),
        debt_type: DebtType::CreditCard,
        principal: Money::from_major(25_000),
        current_balance: None,
        annual_rate: Rate::from_percentage(16),
        interest_method: None,
        start_date: today,
        monthly_payment: Some(Money::from_major(4_000)),
        term_months: None,
    })?;
    let car = ledger.add_debt(NewDebt {
        name: "Car".to_string(),
        debt_type: DebtType::PersonalLoanVehicle,
        principal: Money::from_major(300_000),
        current_balance: Some(Money::from_major(240_000)),
        annual_rate: Rate::from_percentage(9),
        interest_method: None,
        start_date: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
        monthly_payment: None,
        term_months: Some(36),
    })?;

    // three months of payments
    for _ in 0..3 {
        controller.advance(Duration::days(30));
        let card_payment = ledger.record_payment_today(card, Money::from_major(4_000), "monthly", &time)?;
        let car_payment = ledger.record_payment_today(car, Money::from_major(8_000), "monthly", &time)?;
        println!(
            "{}: card interest {} / balance {}, car interest {} / balance {}",
            card_payment.date,
            card_payment.interest_portion.to_output(),
            card_payment.balance_after.to_output(),
            car_payment.interest_portion.to_output(),
            car_payment.balance_after.to_output()
        );
    }

    println!("\n{}", ledger.summary().to_json_pretty()?);

    let as_of = time.now().date_naive();
    let projection = ledger.project(card, None, as_of, ScheduleOptions::default())?;
    println!("\ncard paid off in {} more months", projection.total_months);

    let comparison = ledger.compare(car, Money::from_major(2_000), as_of, ScheduleOptions::default())?;
    println!(
        "2,000 extra on the car saves {} months and {} interest",
        comparison.savings.months, comparison.savings.interest
    );

    println!("\nevents: {}", ledger.take_events().len());

    Ok(())
}
