use chrono::Utc;
use serde::Serialize;

use crate::config::{CardConfig, CardPolicyConfig};
use crate::decimal::{Money, Rate};
use crate::errors::{CardError, Result};
use crate::events::{Event, EventStore};
use crate::policy::{Benefit, DiscountRule};
use crate::subsidy::SubsidyTracker;
use crate::types::{CardVariant, DiscountContext, RiderCategory};

/// service label used for transit fare payments
pub const TRANSIT_LABEL: &str = "TransMilenio";

/// per-variant fare policy
///
/// Sealed: a card is always exactly one of these, there is no abstract case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CardPolicy {
    Basic { recharge_limit: Money },
    Discounted { rate: Rate },
    Subsidized(SubsidyTracker),
}

/// fare card: balance holder with a variant-specific fare policy
#[derive(Debug, Serialize)]
pub struct Card {
    card_number: String,
    holder: String,
    rider_category: RiderCategory,
    balance: Money,
    policy: CardPolicy,
    #[serde(skip)]
    pub events: EventStore,
}

impl Card {
    /// create a card from configuration
    pub fn new(config: CardConfig) -> Result<Self> {
        if config.initial_balance < Money::ZERO {
            return Err(CardError::InvalidConfiguration {
                message: format!(
                    "initial balance cannot be negative, got {}",
                    config.initial_balance
                ),
            });
        }

        let policy = match config.policy {
            CardPolicyConfig::Basic { recharge_limit } => {
                if !recharge_limit.is_positive() {
                    return Err(CardError::InvalidConfiguration {
                        message: format!(
                            "recharge limit must be positive, got {}",
                            recharge_limit
                        ),
                    });
                }
                CardPolicy::Basic { recharge_limit }
            }
            CardPolicyConfig::Discounted { rate } => {
                if !rate.is_discount_fraction() {
                    return Err(CardError::InvalidConfiguration {
                        message: format!("discount rate must be in [0, 1), got {}", rate),
                    });
                }
                CardPolicy::Discounted { rate }
            }
            CardPolicyConfig::Subsidized {
                cap,
                subsidized_fare,
            } => CardPolicy::Subsidized(SubsidyTracker::new(cap, subsidized_fare)?),
        };

        Ok(Self {
            card_number: config.card_number,
            holder: config.holder,
            rider_category: config.rider_category,
            balance: config.initial_balance,
            policy,
            events: EventStore::new(),
        })
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn rider_category(&self) -> RiderCategory {
        self.rider_category
    }

    pub fn variant(&self) -> CardVariant {
        match &self.policy {
            CardPolicy::Basic { .. } => CardVariant::Basic,
            CardPolicy::Discounted { .. } => CardVariant::Discounted,
            CardPolicy::Subsidized(_) => CardVariant::Subsidized,
        }
    }

    /// subsidy state, for subsidized cards
    pub fn subsidy(&self) -> Option<&SubsidyTracker> {
        match &self.policy {
            CardPolicy::Subsidized(tracker) => Some(tracker),
            _ => None,
        }
    }

    /// current balance
    pub fn check_balance(&self) -> Money {
        self.balance
    }

    /// add funds to the card
    ///
    /// The amount must be strictly positive. Basic cards additionally
    /// enforce a per-recharge ceiling. Returns the new balance.
    pub fn recharge(&mut self, amount: Money) -> Result<Money> {
        if !amount.is_positive() {
            return Err(CardError::InvalidAmount { amount });
        }

        if let CardPolicy::Basic { recharge_limit } = &self.policy {
            if amount > *recharge_limit {
                return Err(CardError::RechargeLimitExceeded {
                    limit: *recharge_limit,
                    requested: amount,
                });
            }
        }

        self.balance += amount;

        self.events.emit(Event::CardRecharged {
            card_number: self.card_number.clone(),
            amount,
            new_balance: self.balance,
            timestamp: Utc::now(),
        });

        Ok(self.balance)
    }

    /// deduct a charge from the balance
    ///
    /// Validation precedes mutation: on failure the balance is unchanged.
    /// Emits a payment record naming the amount, the service, and the
    /// resulting balance. Returns the new balance.
    pub fn pay(&mut self, amount: Money, service: &str) -> Result<Money> {
        if !amount.is_positive() {
            return Err(CardError::InvalidAmount { amount });
        }

        if amount > self.balance {
            return Err(CardError::InsufficientFunds {
                available: self.balance,
                requested: amount,
            });
        }

        self.balance -= amount;

        self.events.emit(Event::PaymentReceived {
            card_number: self.card_number.clone(),
            amount,
            service: service.to_string(),
            remaining_balance: self.balance,
            timestamp: Utc::now(),
        });

        Ok(self.balance)
    }

    /// fare this card would be charged for a base cost, without paying
    pub fn compute_fare(&self, base_cost: Money) -> Money {
        self.fare_for(base_cost).0
    }

    /// fare plus whether the subsidized flat fare applied
    fn fare_for(&self, base_cost: Money) -> (Money, bool) {
        match &self.policy {
            CardPolicy::Basic { .. } => (base_cost, false),
            CardPolicy::Discounted { rate } => {
                (base_cost * rate.complement().as_decimal(), false)
            }
            CardPolicy::Subsidized(tracker) => {
                if tracker.is_eligible() {
                    (tracker.subsidized_fare(), true)
                } else {
                    (base_cost, false)
                }
            }
        }
    }

    /// charge a transit fare
    ///
    /// Computes the variant fare for the base cost and pays it. A
    /// subsidized card counts the trip against its cap exactly when the
    /// subsidized fare applied, so a full-price fare that happens to equal
    /// the flat fare never consumes a trip. Returns the new balance.
    pub fn pay_travel(&mut self, base_cost: Money) -> Result<Money> {
        if !base_cost.is_positive() {
            return Err(CardError::InvalidAmount { amount: base_cost });
        }

        let (fare, subsidy_applied) = self.fare_for(base_cost);
        let balance = self.pay(fare, TRANSIT_LABEL)?;

        self.events.emit(Event::FareCharged {
            card_number: self.card_number.clone(),
            variant: self.variant(),
            base_cost,
            charged: fare,
            timestamp: Utc::now(),
        });

        if subsidy_applied {
            if let CardPolicy::Subsidized(tracker) = &mut self.policy {
                tracker.record_trip();

                self.events.emit(Event::SubsidyTripRecorded {
                    card_number: self.card_number.clone(),
                    trips_used: tracker.trips_used(),
                    cap: tracker.cap(),
                    timestamp: Utc::now(),
                });

                if !tracker.is_eligible() {
                    self.events.emit(Event::SubsidyExhausted {
                        card_number: self.card_number.clone(),
                        cap: tracker.cap(),
                        timestamp: Utc::now(),
                    });
                }
            }
        }

        Ok(balance)
    }

    /// whether this card currently offers an active benefit
    pub fn validate_benefit(&self) -> bool {
        match &self.policy {
            CardPolicy::Basic { .. } => false,
            CardPolicy::Discounted { .. } => true,
            CardPolicy::Subsidized(tracker) => tracker.is_eligible(),
        }
    }

    /// discount context this card supplies for a service rule shape
    pub fn context_for(&self, rule: &DiscountRule) -> DiscountContext {
        match rule {
            DiscountRule::ByRider(_) => DiscountContext::Rider(self.rider_category),
            DiscountRule::ByVariant(_) => DiscountContext::Variant(self.variant()),
        }
    }

    /// pretty JSON snapshot of the card state
    pub fn json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CardError::SerializationError {
            message: e.to_string(),
        })
    }

    /// drain accumulated events
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}

impl Benefit for Card {
    fn apply_discount(&self, amount: Money, _context: &DiscountContext) -> Money {
        self.compute_fare(amount)
    }

    fn validate_benefit(&self, _context: &DiscountContext) -> bool {
        self.validate_benefit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn basic_card(balance: i64) -> Card {
        Card::new(
            CardConfig::basic("001", "Carlos").with_initial_balance(Money::from_major(balance)),
        )
        .unwrap()
    }

    #[test]
    fn test_recharge_adds_amount() {
        let mut card = basic_card(20_000);
        let balance = card.recharge(Money::from_major(20_000)).unwrap();
        assert_eq!(balance, Money::from_major(40_000));
    }

    #[test]
    fn test_recharge_rejects_non_positive() {
        let mut card = basic_card(20_000);
        let err = card.recharge(Money::ZERO).unwrap_err();
        assert!(matches!(err, CardError::InvalidAmount { .. }));
        assert_eq!(card.check_balance(), Money::from_major(20_000));
    }

    #[test]
    fn test_recharge_over_limit_leaves_balance_unchanged() {
        let mut card = basic_card(20_000);
        card.recharge(Money::from_major(20_000)).unwrap();

        let err = card.recharge(Money::from_major(250_000)).unwrap_err();
        match err {
            CardError::RechargeLimitExceeded { limit, requested } => {
                assert_eq!(limit, Money::from_major(200_000));
                assert_eq!(requested, Money::from_major(250_000));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(card.check_balance(), Money::from_major(40_000));
    }

    #[test]
    fn test_discounted_card_has_no_recharge_limit() {
        let mut card = Card::new(CardConfig::discounted(
            "002",
            "Maria",
            Rate::from_percentage(20),
        ))
        .unwrap();
        let balance = card.recharge(Money::from_major(500_000)).unwrap();
        assert_eq!(balance, Money::from_major(500_000));
    }

    #[test]
    fn test_pay_reports_required_and_available() {
        let mut card = basic_card(1_000);
        let err = card.pay(Money::from_major(2_950), TRANSIT_LABEL).unwrap_err();
        match err {
            CardError::InsufficientFunds {
                available,
                requested,
            } => {
                assert_eq!(available, Money::from_major(1_000));
                assert_eq!(requested, Money::from_major(2_950));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(card.check_balance(), Money::from_major(1_000));
    }

    #[test]
    fn test_pay_rejects_non_positive() {
        let mut card = basic_card(1_000);
        let err = card.pay(Money::from_major(-5), TRANSIT_LABEL).unwrap_err();
        assert!(matches!(err, CardError::InvalidAmount { .. }));
        assert_eq!(card.check_balance(), Money::from_major(1_000));
    }

    #[test]
    fn test_payment_record_emitted() {
        let mut card = basic_card(10_000);
        card.pay(Money::from_major(3_000), "PublicBike").unwrap();

        let events = card.take_events();
        assert!(events.iter().any(|e| matches!(
            e,
            Event::PaymentReceived {
                amount,
                service,
                remaining_balance,
                ..
            } if *amount == Money::from_major(3_000)
                && service == "PublicBike"
                && *remaining_balance == Money::from_major(7_000)
        )));
    }

    #[test]
    fn test_basic_pay_travel_charges_full_fare() {
        let mut card = basic_card(20_000);
        let balance = card.pay_travel(Money::from_major(2_950)).unwrap();
        assert_eq!(balance, Money::from_major(17_050));
    }

    #[test]
    fn test_discounted_pay_travel() {
        let mut card = Card::new(
            CardConfig::discounted("002", "Maria", Rate::from_percentage(20))
                .with_initial_balance(Money::from_major(50_000)),
        )
        .unwrap();

        assert_eq!(card.compute_fare(Money::from_major(2_950)), Money::from_major(2_360));

        let balance = card.pay_travel(Money::from_major(2_950)).unwrap();
        assert_eq!(balance, Money::from_major(47_640));
        assert!(card.validate_benefit());
    }

    #[test]
    fn test_subsidized_trips_until_cap() {
        let mut card = Card::new(
            CardConfig::subsidized("003", "Julian", 5, Money::from_major(1_000))
                .with_initial_balance(Money::from_major(30_000)),
        )
        .unwrap();

        for trip in 1..=5u32 {
            card.pay_travel(Money::from_major(2_950)).unwrap();
            assert_eq!(card.subsidy().unwrap().trips_used(), trip);
        }
        assert_eq!(card.check_balance(), Money::from_major(25_000));
        assert!(!card.validate_benefit());

        // sixth trip charges the full base cost and does not count
        let balance = card.pay_travel(Money::from_major(2_950)).unwrap();
        assert_eq!(balance, Money::from_major(22_050));
        assert_eq!(card.subsidy().unwrap().trips_used(), 5);
    }

    #[test]
    fn test_exhausted_card_full_fare_equal_to_flat_fare_does_not_count() {
        let mut card = Card::new(
            CardConfig::subsidized("003", "Julian", 1, Money::from_major(1_000))
                .with_initial_balance(Money::from_major(10_000)),
        )
        .unwrap();

        card.pay_travel(Money::from_major(2_950)).unwrap();
        assert_eq!(card.subsidy().unwrap().trips_used(), 1);

        // base cost coincides with the flat fare; counter must not move
        card.pay_travel(Money::from_major(1_000)).unwrap();
        assert_eq!(card.subsidy().unwrap().trips_used(), 1);
    }

    #[test]
    fn test_subsidy_exhaustion_event() {
        let mut card = Card::new(
            CardConfig::subsidized("003", "Julian", 1, Money::from_major(1_000))
                .with_initial_balance(Money::from_major(5_000)),
        )
        .unwrap();

        card.pay_travel(Money::from_major(2_950)).unwrap();
        let events = card.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::SubsidyExhausted { cap: 1, .. })));
    }

    #[test]
    fn test_pay_travel_failure_preserves_counter_and_balance() {
        let mut card = Card::new(
            CardConfig::subsidized("003", "Julian", 5, Money::from_major(1_000))
                .with_initial_balance(Money::from_major(500)),
        )
        .unwrap();

        let err = card.pay_travel(Money::from_major(2_950)).unwrap_err();
        assert!(matches!(err, CardError::InsufficientFunds { .. }));
        assert_eq!(card.check_balance(), Money::from_major(500));
        assert_eq!(card.subsidy().unwrap().trips_used(), 0);
    }

    #[test]
    fn test_rejects_discount_rate_of_one_or_more() {
        let result = Card::new(CardConfig::discounted("002", "Maria", Rate::ONE));
        assert!(matches!(
            result,
            Err(CardError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_initial_balance() {
        let config =
            CardConfig::basic("001", "Carlos").with_initial_balance(Money::from_major(-1));
        assert!(matches!(
            Card::new(config),
            Err(CardError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_fractional_fare_uses_bankers_rounding() {
        let mut card = Card::new(
            CardConfig::discounted("002", "Maria", Rate::from_decimal(dec!(0.15)))
                .with_initial_balance(Money::from_major(10_000)),
        )
        .unwrap();

        // 333 * 0.85 = 283.05
        let balance = card.pay_travel(Money::from_major(333)).unwrap();
        assert_eq!(balance, Money::from_str_exact("9716.95").unwrap());
    }

    #[test]
    fn test_json_snapshot() {
        let card = basic_card(20_000);
        let json = card.json().unwrap();
        assert!(json.contains("\"card_number\": \"001\""));
        assert!(json.contains("Basic"));
    }
}
