use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{CardVariant, DiscountContext, RiderCategory};

/// capability interface for anything that can reduce an amount for a context
pub trait Benefit {
    /// compute the (possibly reduced) amount for the given context
    fn apply_discount(&self, amount: Money, context: &DiscountContext) -> Money;

    /// whether a discount is available for the given context
    fn validate_benefit(&self, context: &DiscountContext) -> bool;
}

/// pluggable discount rule table
///
/// Two shapes exist: rules keyed by rider category and rules keyed by the
/// paying card's variant. Entries map a context to a price multiplier
/// (0.5 means the rider pays half). Contexts without an entry, and contexts
/// of the other shape, pay the unchanged amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiscountRule {
    ByRider(Vec<(RiderCategory, Rate)>),
    ByVariant(Vec<(CardVariant, Rate)>),
}

impl DiscountRule {
    /// rider-keyed rule from (category, multiplier) entries
    pub fn by_rider(entries: Vec<(RiderCategory, Rate)>) -> Self {
        DiscountRule::ByRider(entries)
    }

    /// variant-keyed rule from (variant, multiplier) entries
    pub fn by_variant(entries: Vec<(CardVariant, Rate)>) -> Self {
        DiscountRule::ByVariant(entries)
    }

    /// look up the multiplier for a context, if the rule covers it
    fn multiplier(&self, context: &DiscountContext) -> Option<Rate> {
        match (self, context) {
            (DiscountRule::ByRider(entries), DiscountContext::Rider(category)) => entries
                .iter()
                .find(|(c, _)| c == category)
                .map(|(_, rate)| *rate),
            (DiscountRule::ByVariant(entries), DiscountContext::Variant(variant)) => entries
                .iter()
                .find(|(v, _)| v == variant)
                .map(|(_, rate)| *rate),
            _ => None,
        }
    }

    /// whether this rule offers a discount for any context at all
    pub fn offers_any_discount(&self) -> bool {
        let reduces = |rate: &Rate| *rate < Rate::ONE;
        match self {
            DiscountRule::ByRider(entries) => entries.iter().any(|(_, r)| reduces(r)),
            DiscountRule::ByVariant(entries) => entries.iter().any(|(_, r)| reduces(r)),
        }
    }
}

impl Benefit for DiscountRule {
    fn apply_discount(&self, amount: Money, context: &DiscountContext) -> Money {
        match self.multiplier(context) {
            Some(rate) => amount * rate.as_decimal(),
            None => amount,
        }
    }

    fn validate_benefit(&self, context: &DiscountContext) -> bool {
        self.multiplier(context)
            .map(|rate| rate < Rate::ONE)
            .unwrap_or(false)
    }
}
