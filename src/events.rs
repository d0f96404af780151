use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::CardVariant;

/// all events that can be emitted by cards, services, and the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // balance events
    CardRecharged {
        card_number: String,
        amount: Money,
        new_balance: Money,
        timestamp: DateTime<Utc>,
    },
    PaymentReceived {
        card_number: String,
        amount: Money,
        service: String,
        remaining_balance: Money,
        timestamp: DateTime<Utc>,
    },

    // fare events
    FareCharged {
        card_number: String,
        variant: CardVariant,
        base_cost: Money,
        charged: Money,
        timestamp: DateTime<Utc>,
    },

    // subsidy events
    SubsidyTripRecorded {
        card_number: String,
        trips_used: u32,
        cap: u32,
        timestamp: DateTime<Utc>,
    },
    SubsidyExhausted {
        card_number: String,
        cap: u32,
        timestamp: DateTime<Utc>,
    },

    // service events
    ServiceUsed {
        service: String,
        card_number: String,
        hours: rust_decimal::Decimal,
        base_cost: Money,
        charged: Money,
        timestamp: DateTime<Utc>,
    },

    // registry events
    CardRegistered {
        card_number: String,
        variant: CardVariant,
        timestamp: DateTime<Utc>,
    },
    ServiceRegistered {
        name: String,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
