use std::collections::HashMap;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::account::DebtAccount;
use crate::config::{RatePolicyRegistry, ScheduleOptions};
use crate::decimal::{Money, Rate};
use crate::errors::{DebtError, Result};
use crate::events::{EventStore, LedgerEvent};
use crate::interest::calculate_monthly_payment;
use crate::payments::{
    compare_payments, generate_for_debt, ComparisonRequest, ComparisonResult, PaymentRecord, ScheduleResult,
};
use crate::types::{DebtId, DebtType, InterestMethod};

/// user input for a new tracked debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDebt {
    pub name: String,
    pub debt_type: DebtType,
    pub principal: Money,
    /// defaults to the principal
    pub current_balance: Option<Money>,
    pub annual_rate: Rate,
    /// defaults to the debt type's policy
    pub interest_method: Option<InterestMethod>,
    pub start_date: NaiveDate,
    pub monthly_payment: Option<Money>,
    pub term_months: Option<u32>,
}

/// portfolio totals across tracked debts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    /// outstanding balance of active debts
    pub total_debt: Money,
    pub total_original: Money,
    pub total_interest_paid: Money,
    pub total_paid: Money,
    pub active_count: usize,
    pub paid_count: usize,
}

impl DebtSummary {
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// in-memory book of debts and their payment history
pub struct DebtLedger {
    registry: RatePolicyRegistry,
    debts: HashMap<DebtId, DebtAccount>,
    payments: Vec<PaymentRecord>,
    events: EventStore,
}

impl DebtLedger {
    pub fn new(registry: RatePolicyRegistry) -> Self {
        Self {
            registry,
            debts: HashMap::new(),
            payments: Vec::new(),
            events: EventStore::new(),
        }
    }

    pub fn registry(&self) -> &RatePolicyRegistry {
        &self.registry
    }

    /// validate and store a debt; over-ceiling rates are accepted with a warning
    pub fn add_debt(&mut self, input: NewDebt) -> Result<DebtId> {
        let mut builder = DebtAccount::builder()
            .name(input.name)
            .debt_type(input.debt_type)
            .principal(input.principal)
            .rate(input.annual_rate)
            .start_date(input.start_date);
        if let Some(balance) = input.current_balance {
            builder = builder.current_balance(balance);
        }
        if let Some(method) = input.interest_method {
            builder = builder.interest_method(method);
        }
        if let Some(payment) = input.monthly_payment {
            builder = builder.monthly_payment(payment);
        }
        if let Some(term) = input.term_months {
            builder = builder.term_months(term);
        }
        let debt = builder.build(&self.registry)?;

        let validation = self.registry.validate_rate(debt.annual_rate, debt.debt_type);
        if validation.is_over_limit {
            warn!(
                debt_id = %debt.id,
                debt_type = %debt.debt_type,
                rate = %debt.annual_rate,
                max_rate = %validation.max_rate,
                "{}", validation.message
            );
        }

        let id = debt.id;
        self.events.emit(LedgerEvent::DebtAdded {
            debt_id: id,
            debt_type: debt.debt_type,
            principal: debt.principal,
            annual_rate: debt.annual_rate,
            over_ceiling: validation.is_over_limit,
        });
        debug!(debt_id = %id, name = %debt.name, "debt added");
        self.debts.insert(id, debt);

        Ok(id)
    }

    pub fn get(&self, id: DebtId) -> Option<&DebtAccount> {
        self.debts.get(&id)
    }

    fn require(&self, id: DebtId) -> Result<&DebtAccount> {
        self.debts.get(&id).ok_or(DebtError::AccountNotFound { id })
    }

    /// drop a debt together with its payment history
    pub fn remove(&mut self, id: DebtId) -> Result<DebtAccount> {
        let debt = self.debts.remove(&id).ok_or(DebtError::AccountNotFound { id })?;

        let before = self.payments.len();
        self.payments.retain(|p| p.debt_id != id);
        let payments_dropped = before - self.payments.len();

        self.events.emit(LedgerEvent::DebtRemoved {
            debt_id: id,
            payments_dropped,
        });
        debug!(debt_id = %id, payments_dropped, "debt removed");

        Ok(debt)
    }

    /// all debts sorted by name
    pub fn debts(&self) -> Vec<&DebtAccount> {
        let mut debts: Vec<&DebtAccount> = self.debts.values().collect();
        debts.sort_by(|a, b| a.name.cmp(&b.name));
        debts
    }

    /// allocate and record a payment dated `date`
    pub fn record_payment(
        &mut self,
        id: DebtId,
        amount: Money,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Result<PaymentRecord> {
        let debt = self.debts.get_mut(&id).ok_or(DebtError::AccountNotFound { id })?;
        let was_paid = debt.is_paid();
        let record = debt.apply_payment(amount, date, note)?;

        debug!(
            debt_id = %id,
            amount = %amount,
            interest = %record.interest_portion.to_output(),
            principal = %record.principal_portion.to_output(),
            balance = %record.balance_after.to_output(),
            "payment recorded"
        );
        self.events.emit(LedgerEvent::PaymentRecorded {
            debt_id: id,
            date,
            amount,
            interest_portion: record.interest_portion,
            principal_portion: record.principal_portion,
            balance_after: record.balance_after,
        });

        if debt.is_paid() && !was_paid {
            info!(debt_id = %id, name = %debt.name, total_paid = %debt.total_paid.to_output(), "debt paid off");
            self.events.emit(LedgerEvent::DebtPaidOff {
                debt_id: id,
                date,
                total_paid: debt.total_paid,
                total_interest_paid: debt.total_interest_paid,
            });
        }

        self.payments.push(record.clone());
        Ok(record)
    }

    /// record a payment dated today according to the injected clock
    pub fn record_payment_today(
        &mut self,
        id: DebtId,
        amount: Money,
        note: impl Into<String>,
        time: &SafeTimeProvider,
    ) -> Result<PaymentRecord> {
        let today = time.now().date_naive();
        self.record_payment(id, amount, today, note)
    }

    /// payments for one debt, oldest first
    pub fn payments_for(&self, id: DebtId) -> Vec<&PaymentRecord> {
        let mut payments: Vec<&PaymentRecord> = self.payments.iter().filter(|p| p.debt_id == id).collect();
        payments.sort_by_key(|p| p.date);
        payments
    }

    /// every payment, newest first
    pub fn all_payments(&self) -> Vec<&PaymentRecord> {
        let mut payments: Vec<&PaymentRecord> = self.payments.iter().collect();
        payments.sort_by(|a, b| b.date.cmp(&a.date));
        payments
    }

    /// outstanding balance across active debts
    pub fn total_debt(&self) -> Money {
        self.debts
            .values()
            .filter(|d| !d.is_paid())
            .map(|d| d.current_balance)
            .sum()
    }

    pub fn summary(&self) -> DebtSummary {
        let paid_count = self.debts.values().filter(|d| d.is_paid()).count();

        DebtSummary {
            total_debt: self.total_debt().to_output(),
            total_original: self.debts.values().map(|d| d.principal).sum::<Money>().to_output(),
            total_interest_paid: self
                .debts
                .values()
                .map(|d| d.total_interest_paid)
                .sum::<Money>()
                .to_output(),
            total_paid: self.debts.values().map(|d| d.total_paid).sum::<Money>().to_output(),
            active_count: self.debts.len() - paid_count,
            paid_count,
        }
    }

    /// payoff projection for a stored debt from its current balance
    pub fn project(
        &self,
        id: DebtId,
        payment: Option<Money>,
        as_of: NaiveDate,
        options: ScheduleOptions,
    ) -> Result<ScheduleResult> {
        let debt = self.require(id)?;
        generate_for_debt(debt, payment, as_of, &self.registry, options)
    }

    /// compare the debt's regular payment with `extra` on top, under the debt's own method
    ///
    /// revolving debts without a configured payment use the policy minimum as baseline
    pub fn compare(
        &self,
        id: DebtId,
        extra: Money,
        as_of: NaiveDate,
        options: ScheduleOptions,
    ) -> Result<ComparisonResult> {
        let debt = self.require(id)?;

        let min_payment = match (debt.monthly_payment, debt.term_months) {
            (Some(payment), _) => payment,
            _ if debt.debt_type.is_revolving() => Money::ZERO,
            (None, Some(term)) => calculate_monthly_payment(debt.current_balance, debt.annual_rate, term)?,
            (None, None) => return Err(DebtError::invalid("monthly_payment", "missing")),
        };

        let request = ComparisonRequest {
            principal: debt.current_balance,
            annual_rate: debt.annual_rate,
            min_payment,
            extra_payment: extra,
            debt_type: debt.debt_type,
            start_date: as_of,
            interest_method: Some(debt.interest_method),
            original_principal: Some(debt.principal),
        };
        compare_payments(&request, &self.registry, options)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        self.events.take_events()
    }
}

impl Default for DebtLedger {
    fn default() -> Self {
        Self::new(RatePolicyRegistry::default())
    }
}
