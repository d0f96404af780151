use thiserror::Error;

use crate::decimal::Money;
use rust_decimal::Decimal;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("invalid amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("recharge limit exceeded: limit {limit}, requested {requested}")]
    RechargeLimitExceeded {
        limit: Money,
        requested: Money,
    },

    #[error("insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        available: Money,
        requested: Money,
    },

    #[error("invalid duration: {hours} hours")]
    InvalidDuration {
        hours: Decimal,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {message}")]
    SerializationError {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, CardError>;
