use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::RatePolicyRegistry;
use crate::decimal::{Money, Rate};
use crate::errors::{ensure_non_negative, DebtError, Result};
use crate::payments::{allocate_payment, PaymentRecord};
use crate::types::{DebtId, DebtStatus, DebtType, InterestMethod};

/// tracked debt and its running bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAccount {
    // identification
    pub id: DebtId,
    pub name: String,
    pub debt_type: DebtType,
    pub interest_method: InterestMethod,

    // balances
    pub principal: Money,
    pub current_balance: Money,
    pub annual_rate: Rate,
    /// interest accrued but not yet paid (daily accrual only)
    pub accrued_interest: Money,

    // dates
    pub start_date: NaiveDate,
    pub last_interest_date: NaiveDate,

    // repayment terms
    pub monthly_payment: Option<Money>,
    pub term_months: Option<u32>,

    // lifetime totals
    pub total_interest_paid: Money,
    pub total_paid: Money,

    pub status: DebtStatus,
}

impl DebtAccount {
    pub fn builder() -> DebtAccountBuilder {
        DebtAccountBuilder::new()
    }

    pub fn is_paid(&self) -> bool {
        self.status == DebtStatus::Paid
    }

    /// principal repaid so far
    pub fn principal_repaid(&self) -> Money {
        (self.principal - self.current_balance).max(Money::ZERO)
    }

    /// allocate a payment and fold it into the running state
    pub fn apply_payment(&mut self, amount: Money, date: NaiveDate, note: impl Into<String>) -> Result<PaymentRecord> {
        let allocation = allocate_payment(self, amount, date)?;

        self.current_balance = allocation.updated_balance;
        self.accrued_interest = allocation.updated_accrued_interest;
        if self.interest_method == InterestMethod::DailyAccrual {
            self.last_interest_date = date;
        }
        self.total_interest_paid += allocation.interest_portion;
        self.total_paid += amount;
        if allocation.paid_off {
            self.current_balance = Money::ZERO;
            self.status = DebtStatus::Paid;
        }

        Ok(PaymentRecord {
            debt_id: self.id,
            date,
            amount,
            interest_portion: allocation.interest_portion,
            principal_portion: allocation.principal_portion,
            balance_after: self.current_balance,
            note: note.into(),
        })
    }
}

/// builder for debt accounts; the interest method defaults to the type's policy
#[derive(Debug, Clone, Default)]
pub struct DebtAccountBuilder {
    id: Option<DebtId>,
    name: Option<String>,
    debt_type: Option<DebtType>,
    interest_method: Option<InterestMethod>,
    principal: Option<Money>,
    current_balance: Option<Money>,
    rate: Option<Rate>,
    start_date: Option<NaiveDate>,
    last_interest_date: Option<NaiveDate>,
    monthly_payment: Option<Money>,
    term_months: Option<u32>,
}

impl DebtAccountBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: DebtId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn debt_type(mut self, debt_type: DebtType) -> Self {
        self.debt_type = Some(debt_type);
        self
    }

    pub fn interest_method(mut self, method: InterestMethod) -> Self {
        self.interest_method = Some(method);
        self
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    /// outstanding balance when the debt is older than its tracking
    pub fn current_balance(mut self, balance: Money) -> Self {
        self.current_balance = Some(balance);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn last_interest_date(mut self, date: NaiveDate) -> Self {
        self.last_interest_date = Some(date);
        self
    }

    pub fn monthly_payment(mut self, payment: Money) -> Self {
        self.monthly_payment = Some(payment);
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.term_months = Some(months);
        self
    }

    pub fn build(self, registry: &RatePolicyRegistry) -> Result<DebtAccount> {
        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(DebtError::invalid("name", "empty"));
        }

        let principal = self.principal.ok_or_else(|| DebtError::invalid("principal", "missing"))?;
        let annual_rate = self.rate.ok_or_else(|| DebtError::invalid("annual_rate", "missing"))?;
        let start_date = self.start_date.ok_or_else(|| DebtError::invalid("start_date", "missing"))?;

        ensure_non_negative("principal", principal)?;
        if annual_rate.is_negative() {
            return Err(DebtError::invalid("annual_rate", annual_rate));
        }

        let current_balance = self.current_balance.unwrap_or(principal);
        ensure_non_negative("current_balance", current_balance)?;

        if let Some(payment) = self.monthly_payment {
            ensure_non_negative("monthly_payment", payment)?;
        }
        if self.term_months == Some(0) {
            return Err(DebtError::invalid("term_months", 0));
        }

        let debt_type = self.debt_type.unwrap_or(RatePolicyRegistry::FALLBACK);
        let interest_method = self
            .interest_method
            .unwrap_or_else(|| registry.get_config(debt_type).method);

        let status = if current_balance.is_settled() {
            DebtStatus::Paid
        } else {
            DebtStatus::Active
        };

        Ok(DebtAccount {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name,
            debt_type,
            interest_method,
            principal,
            current_balance,
            annual_rate,
            accrued_interest: Money::ZERO,
            start_date,
            last_interest_date: self.last_interest_date.unwrap_or(start_date),
            monthly_payment: self.monthly_payment,
            term_months: self.term_months,
            total_interest_paid: Money::ZERO,
            total_paid: Money::ZERO,
            status,
        })
    }
}
