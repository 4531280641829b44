use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::interest::PeriodInterest;
use crate::types::InterestMethod;

/// one day of interest on a 365-day year
pub fn daily_interest(balance: Money, annual_rate: Rate) -> Money {
    Money::from_decimal(balance.as_decimal() * annual_rate.daily_rate())
}

/// interest accrued over a number of days
pub fn daily_accrual(balance: Money, annual_rate: Rate, days: u32) -> Money {
    let interest = balance.as_decimal() * annual_rate.daily_rate() * Decimal::from(days);
    Money::from_decimal(interest)
}

/// `daily_accrual` that reports overflow instead of panicking
pub fn checked_daily_accrual(balance: Money, annual_rate: Rate, days: u32) -> Option<Money> {
    balance
        .as_decimal()
        .checked_mul(annual_rate.daily_rate())?
        .checked_mul(Decimal::from(days))
        .map(Money::from_decimal)
}

/// whole calendar days from `start` to `end`, zero when `end` precedes `start`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    (end - start).num_days().max(0) as u32
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// one calendar billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub year: i32,
    pub month: u32,
    pub days: u32,
}

impl BillingPeriod {
    /// `YYYY-MM`
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// calendar-month cursor with year rollover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingCursor {
    year: i32,
    month: u32,
}

impl BillingCursor {
    /// cursor at the month containing `date`
    pub fn starting_at(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current(&self) -> BillingPeriod {
        BillingPeriod {
            year: self.year,
            month: self.month,
            days: days_in_month(self.year, self.month),
        }
    }

    pub fn advance(&mut self) {
        if self.month == 12 {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }
}

/// daily interest summed over the actual days of each billing month
#[derive(Debug, Clone, Copy)]
pub struct DailyAccrualInterest {
    pub annual_rate: Rate,
}

impl DailyAccrualInterest {
    /// days charged when no calendar is attached
    pub const ABSTRACT_MONTH_DAYS: u32 = 30;

    pub fn new(annual_rate: Rate) -> Self {
        Self { annual_rate }
    }
}

impl PeriodInterest for DailyAccrualInterest {
    fn period_interest(&self, balance: Money, period: Option<&BillingPeriod>) -> Option<Money> {
        let days = period.map_or(Self::ABSTRACT_MONTH_DAYS, |p| p.days);
        checked_daily_accrual(balance, self.annual_rate, days)
    }

    fn method(&self) -> InterestMethod {
        InterestMethod::DailyAccrual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_daily_interest() {
        let interest = daily_interest(Money::from_major(50_000), Rate::from_percentage(16));
        let expected = Money::from_decimal(dec!(50000) * dec!(0.16) / dec!(365));
        assert_eq!(interest, expected);
        assert_eq!(interest.to_output(), Money::from_str_exact("21.92").unwrap());
    }

    #[test]
    fn test_daily_accrual_is_daily_times_days() {
        let balance = Money::from_major(50_000);
        let rate = Rate::from_percentage(16);

        let accrued = daily_accrual(balance, rate, 30);
        let daily = daily_interest(balance, rate);
        assert!((accrued - daily * Decimal::from(30)).abs() <= Money::from_str_exact("0.000001").unwrap());
        assert_eq!(accrued.to_output(), Money::from_str_exact("657.53").unwrap());
    }

    #[test]
    fn test_days_between_clamps_negative() {
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        assert_eq!(days_between(jan1, jan31), 30);
        assert_eq!(days_between(jan31, jan1), 0);
        assert_eq!(days_between(jan1, jan1), 0);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_cursor_rolls_over_year() {
        let mut cursor = BillingCursor::starting_at(NaiveDate::from_ymd_opt(2023, 11, 30).unwrap());

        assert_eq!(cursor.current().label(), "2023-11");
        assert_eq!(cursor.current().days, 30);

        cursor.advance();
        assert_eq!(cursor.current().label(), "2023-12");

        cursor.advance();
        let jan = cursor.current();
        assert_eq!((jan.year, jan.month, jan.days), (2024, 1, 31));

        cursor.advance();
        assert_eq!(cursor.current().days, 29);
    }

    #[test]
    fn test_strategy_uses_actual_days() {
        let strategy = DailyAccrualInterest::new(Rate::from_percentage(18));
        let balance = Money::from_major(10_000);

        let feb = BillingPeriod { year: 2023, month: 2, days: 28 };
        let mar = BillingPeriod { year: 2023, month: 3, days: 31 };

        assert_eq!(strategy.period_interest(balance, Some(&feb)), Some(daily_accrual(balance, strategy.annual_rate, 28)));
        assert!(strategy.period_interest(balance, Some(&mar)) > strategy.period_interest(balance, Some(&feb)));
        assert_eq!(strategy.period_interest(balance, None), Some(daily_accrual(balance, strategy.annual_rate, 30)));
    }
}
