pub mod card;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod policy;
pub mod registry;
pub mod services;
pub mod subsidy;
pub mod types;

// re-export key types
pub use card::{Card, CardPolicy, TRANSIT_LABEL};
pub use config::{CardConfig, CardPolicyConfig, ServiceConfig, BASIC_RECHARGE_LIMIT};
pub use decimal::{Money, Rate};
pub use errors::{CardError, Result};
pub use events::{Event, EventStore};
pub use policy::{Benefit, DiscountRule};
pub use registry::Registry;
pub use services::{
    BikeShare, BikeShareBuilder, PublicParking, PublicParkingBuilder, TransitService,
};
pub use subsidy::SubsidyTracker;
pub use types::{
    BenefitKind, BenefitReport, CardVariant, DiscountContext, RiderCategory, SubsidyStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
