use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{DebtId, DebtType};

/// events emitted by the debt ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    DebtAdded {
        debt_id: DebtId,
        debt_type: DebtType,
        principal: Money,
        annual_rate: Rate,
        over_ceiling: bool,
    },
    PaymentRecorded {
        debt_id: DebtId,
        date: NaiveDate,
        amount: Money,
        interest_portion: Money,
        principal_portion: Money,
        balance_after: Money,
    },
    DebtPaidOff {
        debt_id: DebtId,
        date: NaiveDate,
        total_paid: Money,
        total_interest_paid: Money,
    },
    DebtRemoved {
        debt_id: DebtId,
        payments_dropped: usize,
    },
}

impl LedgerEvent {
    pub fn debt_id(&self) -> DebtId {
        match self {
            LedgerEvent::DebtAdded { debt_id, .. }
            | LedgerEvent::PaymentRecorded { debt_id, .. }
            | LedgerEvent::DebtPaidOff { debt_id, .. }
            | LedgerEvent::DebtRemoved { debt_id, .. } => *debt_id,
        }
    }
}

/// append-only buffer of ledger events, drained by the caller
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<LedgerEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
