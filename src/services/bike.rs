use crate::config::ServiceConfig;
use crate::decimal::Money;
use crate::errors::{CardError, Result};
use crate::policy::{Benefit, DiscountRule};
use crate::services::TransitService;
use crate::types::DiscountContext;

/// reference hourly rate for the bike share
pub const BIKE_HOURLY_RATE: i64 = 5_000;

/// public bike share service
#[derive(Debug, Clone, PartialEq)]
pub struct BikeShare {
    config: ServiceConfig,
}

impl BikeShare {
    /// create from configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        if !config.hourly_rate.is_positive() {
            return Err(CardError::InvalidConfiguration {
                message: format!("hourly rate must be positive, got {}", config.hourly_rate),
            });
        }
        Ok(Self { config })
    }
}

impl TransitService for BikeShare {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn hourly_rate(&self) -> Money {
        self.config.hourly_rate
    }

    fn rule(&self) -> &DiscountRule {
        &self.config.rule
    }
}

impl Benefit for BikeShare {
    fn apply_discount(&self, amount: Money, context: &DiscountContext) -> Money {
        self.config.rule.apply_discount(amount, context)
    }

    fn validate_benefit(&self, context: &DiscountContext) -> bool {
        self.config.rule.validate_benefit(context)
    }
}

/// builder for bike share services
pub struct BikeShareBuilder {
    hourly_rate: Money,
    rule: Option<DiscountRule>,
    name: Option<String>,
}

impl BikeShareBuilder {
    pub fn new() -> Self {
        Self {
            hourly_rate: Money::from_major(BIKE_HOURLY_RATE),
            rule: None,
            name: None,
        }
    }

    pub fn hourly_rate(mut self, rate: Money) -> Self {
        self.hourly_rate = rate;
        self
    }

    pub fn rule(mut self, rule: DiscountRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// use the variant-keyed reference rule instead of the rider-keyed one
    pub fn by_variant(mut self) -> Self {
        self.rule = Some(ServiceConfig::bike_by_variant(self.hourly_rate).rule);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<BikeShare> {
        let mut config = ServiceConfig::bike_by_rider(self.hourly_rate);
        if let Some(rule) = self.rule {
            config.rule = rule;
        }
        if let Some(name) = self.name {
            config.name = name;
        }
        BikeShare::new(config)
    }
}

impl Default for BikeShareBuilder {
    fn default() -> Self {
        Self::new()
    }
}
