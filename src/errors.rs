use thiserror::Error;

use crate::decimal::Money;
use crate::types::CreditStatus;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollectionsError {
    #[error("unknown payment frequency: {value}")]
    UnknownFrequency {
        value: String,
    },

    #[error("unknown {kind} status: {value}")]
    UnknownStatus {
        kind: &'static str,
        value: String,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("amount is not a finite number")]
    NonFiniteAmount,

    #[error("invalid installment number: {number}")]
    InvalidInstallmentNumber {
        number: u32,
    },

    #[error("invalid installment amount: {amount}")]
    InvalidInstallmentAmount {
        amount: Money,
    },

    #[error("inconsistent terms: installments add up to {actual}, total amount is {expected}")]
    InconsistentTerms {
        expected: Money,
        actual: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: CreditStatus,
        to: CreditStatus,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, CollectionsError>;
