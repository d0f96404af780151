use serde::{Deserialize, Serialize};
use std::fmt;

/// card variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardVariant {
    /// full-fare card with a recharge ceiling
    Basic,
    /// fixed fractional discount on every fare
    Discounted,
    /// flat subsidized fare for a capped number of trips
    Subsidized,
}

impl fmt::Display for CardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardVariant::Basic => write!(f, "basic"),
            CardVariant::Discounted => write!(f, "discounted"),
            CardVariant::Subsidized => write!(f, "subsidized"),
        }
    }
}

/// rider categories recognized by rider-keyed service rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiderCategory {
    #[default]
    General,
    Student,
    Resident,
    Disabled,
}

impl fmt::Display for RiderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiderCategory::General => write!(f, "general"),
            RiderCategory::Student => write!(f, "student"),
            RiderCategory::Resident => write!(f, "resident"),
            RiderCategory::Disabled => write!(f, "disabled"),
        }
    }
}

/// subsidy eligibility state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubsidyStatus {
    /// trips used below the cap
    Eligible,
    /// cap reached, fares revert to full price
    Exhausted,
}

/// context a discount rule is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountContext {
    Rider(RiderCategory),
    Variant(CardVariant),
}

/// what kind of registrant a benefit report line refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenefitKind {
    Card,
    Service,
}

/// one line of the active-benefits report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitReport {
    pub kind: BenefitKind,
    pub label: String,
    pub description: String,
}

impl fmt::Display for BenefitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.description)
    }
}
