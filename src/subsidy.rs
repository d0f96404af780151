use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CardError, Result};
use crate::types::SubsidyStatus;

/// trip-limited subsidy state
///
/// Tracks trips charged at the flat subsidized fare against a cap. The
/// counter is one-way: it only moves toward the cap and there is no reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsidyTracker {
    cap: u32,
    subsidized_fare: Money,
    trips_used: u32,
}

impl SubsidyTracker {
    /// create a tracker with zero trips used
    pub fn new(cap: u32, subsidized_fare: Money) -> Result<Self> {
        if !subsidized_fare.is_positive() {
            return Err(CardError::InvalidConfiguration {
                message: format!("subsidized fare must be positive, got {}", subsidized_fare),
            });
        }

        Ok(Self {
            cap,
            subsidized_fare,
            trips_used: 0,
        })
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    pub fn subsidized_fare(&self) -> Money {
        self.subsidized_fare
    }

    pub fn trips_used(&self) -> u32 {
        self.trips_used
    }

    /// whether the next trip still qualifies for the subsidized fare
    pub fn is_eligible(&self) -> bool {
        self.trips_used < self.cap
    }

    pub fn status(&self) -> SubsidyStatus {
        if self.is_eligible() {
            SubsidyStatus::Eligible
        } else {
            SubsidyStatus::Exhausted
        }
    }

    /// count a trip charged at the subsidized fare
    ///
    /// Saturates at the cap; callers only invoke this when the subsidy was
    /// actually applied, so the counter never passes the cap.
    pub fn record_trip(&mut self) {
        if self.trips_used < self.cap {
            self.trips_used += 1;
        }
    }
}
