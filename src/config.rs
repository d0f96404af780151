use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::policy::DiscountRule;
use crate::types::{CardVariant, RiderCategory};

/// recharge ceiling for basic cards in the reference policy
pub const BASIC_RECHARGE_LIMIT: i64 = 200_000;

/// card configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    pub card_number: String,
    pub holder: String,
    pub initial_balance: Money,
    pub rider_category: RiderCategory,
    pub policy: CardPolicyConfig,
}

/// per-variant card parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardPolicyConfig {
    Basic { recharge_limit: Money },
    Discounted { rate: Rate },
    Subsidized { cap: u32, subsidized_fare: Money },
}

impl CardConfig {
    /// basic card with the reference recharge ceiling
    pub fn basic(card_number: impl Into<String>, holder: impl Into<String>) -> Self {
        Self {
            card_number: card_number.into(),
            holder: holder.into(),
            initial_balance: Money::ZERO,
            rider_category: RiderCategory::General,
            policy: CardPolicyConfig::Basic {
                recharge_limit: Money::from_major(BASIC_RECHARGE_LIMIT),
            },
        }
    }

    /// discounted card with a fixed fractional discount on every fare
    pub fn discounted(
        card_number: impl Into<String>,
        holder: impl Into<String>,
        rate: Rate,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            holder: holder.into(),
            initial_balance: Money::ZERO,
            rider_category: RiderCategory::General,
            policy: CardPolicyConfig::Discounted { rate },
        }
    }

    /// subsidized card with a flat fare for a capped number of trips
    pub fn subsidized(
        card_number: impl Into<String>,
        holder: impl Into<String>,
        cap: u32,
        subsidized_fare: Money,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            holder: holder.into(),
            initial_balance: Money::ZERO,
            rider_category: RiderCategory::General,
            policy: CardPolicyConfig::Subsidized {
                cap,
                subsidized_fare,
            },
        }
    }

    pub fn with_initial_balance(mut self, balance: Money) -> Self {
        self.initial_balance = balance;
        self
    }

    pub fn with_rider_category(mut self, category: RiderCategory) -> Self {
        self.rider_category = category;
        self
    }
}

/// service configuration: a rate provider plus its discount rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub hourly_rate: Money,
    pub rule: DiscountRule,
}

impl ServiceConfig {
    /// bike share with the rider-keyed reference rule: students pay half
    pub fn bike_by_rider(hourly_rate: Money) -> Self {
        Self {
            name: "PublicBike".to_string(),
            hourly_rate,
            rule: DiscountRule::by_rider(vec![(
                RiderCategory::Student,
                Rate::from_decimal(dec!(0.5)),
            )]),
        }
    }

    /// bike share with the variant-keyed reference rule: subsidized cards pay 0.8x
    pub fn bike_by_variant(hourly_rate: Money) -> Self {
        Self {
            name: "PublicBike".to_string(),
            hourly_rate,
            rule: DiscountRule::by_variant(vec![(
                CardVariant::Subsidized,
                Rate::from_decimal(dec!(0.8)),
            )]),
        }
    }

    /// parking with the rider-keyed reference rule: residents 0.6x, disabled 0.4x
    pub fn parking_by_rider(hourly_rate: Money) -> Self {
        Self {
            name: "PublicParking".to_string(),
            hourly_rate,
            rule: DiscountRule::by_rider(vec![
                (RiderCategory::Resident, Rate::from_decimal(dec!(0.6))),
                (RiderCategory::Disabled, Rate::from_decimal(dec!(0.4))),
            ]),
        }
    }

    /// parking with the variant-keyed reference rule: subsidized cards pay 0.85x
    pub fn parking_by_variant(hourly_rate: Money) -> Self {
        Self {
            name: "PublicParking".to_string(),
            hourly_rate,
            rule: DiscountRule::by_variant(vec![(
                CardVariant::Subsidized,
                Rate::from_decimal(dec!(0.85)),
            )]),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Benefit;
    use crate::types::DiscountContext;

    #[test]
    fn test_basic_config_carries_reference_limit() {
        let config = CardConfig::basic("001", "Carlos");
        match config.policy {
            CardPolicyConfig::Basic { recharge_limit } => {
                assert_eq!(recharge_limit, Money::from_major(200_000));
            }
            _ => panic!("expected basic policy"),
        }
    }

    #[test]
    fn test_bike_rider_rule_halves_student_fare() {
        let config = ServiceConfig::bike_by_rider(Money::from_major(5_000));
        let ctx = DiscountContext::Rider(RiderCategory::Student);
        assert_eq!(
            config.rule.apply_discount(Money::from_major(10_000), &ctx),
            Money::from_major(5_000)
        );
    }

    #[test]
    fn test_parking_rider_rule_magnitudes() {
        let config = ServiceConfig::parking_by_rider(Money::from_major(4_000));
        let base = Money::from_major(2_800);

        let resident = DiscountContext::Rider(RiderCategory::Resident);
        let disabled = DiscountContext::Rider(RiderCategory::Disabled);

        assert_eq!(
            config.rule.apply_discount(base, &resident),
            Money::from_major(1_680)
        );
        assert_eq!(
            config.rule.apply_discount(base, &disabled),
            Money::from_major(1_120)
        );
    }

    #[test]
    fn test_variant_rules_cover_subsidized_only() {
        let bike = ServiceConfig::bike_by_variant(Money::from_major(5_000));
        let parking = ServiceConfig::parking_by_variant(Money::from_major(4_000));
        let subsidized = DiscountContext::Variant(CardVariant::Subsidized);
        let basic = DiscountContext::Variant(CardVariant::Basic);

        assert!(bike.rule.validate_benefit(&subsidized));
        assert!(!bike.rule.validate_benefit(&basic));
        assert_eq!(
            parking.rule.apply_discount(Money::from_major(12_000), &subsidized),
            Money::from_major(10_200)
        );
    }
}
