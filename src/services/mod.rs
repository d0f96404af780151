pub mod bike;
pub mod parking;

pub use bike::{BikeShare, BikeShareBuilder};
pub use parking::{PublicParking, PublicParkingBuilder};

use chrono::Utc;
use rust_decimal::Decimal;

use crate::card::Card;
use crate::decimal::Money;
use crate::errors::{CardError, Result};
use crate::events::Event;
use crate::policy::{Benefit, DiscountRule};

/// hourly rate provider that charges cards through its discount rule
///
/// `Benefit` supplies `apply_discount` and `validate_benefit`; this trait
/// adds the rate, the rule table, and the charge flow.
pub trait TransitService: Benefit {
    fn name(&self) -> &str;
    fn hourly_rate(&self) -> Money;
    fn rule(&self) -> &DiscountRule;

    /// cost a card would be charged for a duration, without paying
    fn quote(&self, card: &Card, hours: Decimal) -> Result<Money> {
        if hours <= Decimal::ZERO {
            return Err(CardError::InvalidDuration { hours });
        }
        let base_cost = self.hourly_rate() * hours;
        let context = card.context_for(self.rule());
        Ok(self.rule().apply_discount(base_cost, &context))
    }

    /// charge a card for using the service for a duration
    ///
    /// base = hourly rate x hours, reduced by the rule for the card's
    /// context, then paid from the card. Returns the resulting balance.
    fn use_service(&self, card: &mut Card, hours: Decimal) -> Result<Money> {
        if hours <= Decimal::ZERO {
            return Err(CardError::InvalidDuration { hours });
        }

        let base_cost = self.hourly_rate() * hours;
        let context = card.context_for(self.rule());
        let final_cost = self.rule().apply_discount(base_cost, &context);

        let balance = card.pay(final_cost, self.name())?;

        card.events.emit(Event::ServiceUsed {
            service: self.name().to_string(),
            card_number: card.card_number().to_string(),
            hours,
            base_cost,
            charged: final_cost,
            timestamp: Utc::now(),
        });

        Ok(balance)
    }

    /// whether the rule reduces the price for at least one context
    fn offers_any_discount(&self) -> bool {
        self.rule().offers_any_discount()
    }
}
