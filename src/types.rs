use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::decimal::Money;

/// the four inputs of the loan application form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    EmailAddress,
    LoanAmount,
    LoanTerm,
}

impl Field {
    /// every field, in form order
    pub const ALL: [Field; 4] = [
        Field::FirstName,
        Field::EmailAddress,
        Field::LoanAmount,
        Field::LoanTerm,
    ];

    /// wire name used in json bodies
    pub fn as_str(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::EmailAddress => "emailAddress",
            Field::LoanAmount => "loanAmount",
            Field::LoanTerm => "loanTerm",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "FIRST NAME*",
            Field::EmailAddress => "EMAIL ADDRESS*",
            Field::LoanAmount => "LOAN AMOUNT ($)*",
            Field::LoanTerm => "LOAN TERM*",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// raw form input, kept as typed text so editing never loses what the user entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub first_name: String,
    pub email_address: String,
    pub loan_amount: String,
    pub loan_term: String,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::EmailAddress => &self.email_address,
            Field::LoanAmount => &self.loan_amount,
            Field::LoanTerm => &self.loan_term,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::EmailAddress => &mut self.email_address,
            Field::LoanAmount => &mut self.loan_amount,
            Field::LoanTerm => &mut self.loan_term,
        };
        *slot = value.into();
    }

    /// true when every field holds some text
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|field| !self.get(*field).is_empty())
    }
}

/// error message per field; absent or empty means valid
pub type FieldErrors = BTreeMap<Field, String>;

/// whether a field has been interacted with
pub type TouchedState = BTreeMap<Field, bool>;

/// body of `POST /api/offers`
///
/// Every field is optional on the wire so a missing one surfaces as
/// "All fields are required" instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub loan_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub loan_term: Option<Decimal>,
}

/// a single lender's repayment estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanOffer {
    pub lender_name: String,
    pub monthly_repayment: Money,
    /// annual rate in percent, 5.5 for 5.5%
    #[serde(with = "rust_decimal::serde::float")]
    pub interest_rate: Decimal,
    pub fees: String,
}
