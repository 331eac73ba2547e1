use thiserror::Error;

use crate::types::Field;

/// field-level validation failures, rendered inline next to the input
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("First name is required.")]
    FirstNameRequired,

    #[error("First name must only contain letters.")]
    FirstNameInvalid,

    #[error("Email address is required.")]
    EmailRequired,

    #[error("Enter a valid email.")]
    EmailInvalid,

    #[error("Loan amount is required.")]
    LoanAmountRequired,

    #[error("Enter a valid loan amount.")]
    LoanAmountNotNumeric,

    #[error("Loan amount must be at least $2000.")]
    LoanAmountTooSmall,

    #[error("Loan term is required.")]
    LoanTermRequired,

    #[error("Enter a valid loan term.")]
    LoanTermNotNumeric,

    #[error("Loan term must be between 1 and 7 years.")]
    LoanTermOutOfRange,
}

#[derive(Error, Debug)]
pub enum OfferError {
    #[error("All fields are required")]
    MissingFields,

    #[error("{source}")]
    InvalidField {
        field: Field,
        source: FieldError,
    },

    #[error("calculation error: {message}")]
    Calculation {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("offer request failed: {message}")]
    Transport {
        message: String,
    },

    #[error("offer service responded with status {status}")]
    UnexpectedStatus {
        status: u16,
    },
}

impl From<reqwest::Error> for OfferError {
    fn from(err: reqwest::Error) -> Self {
        OfferError::Transport {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OfferError>;
