//! Field validation rules for the loan application form.
//!
//! Each [`Field`] owns one rule in [`RULES`]; every rule shares the same
//! signature so callers can validate any field the same way, one field at a
//! time while editing or all at once on submit.

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::errors::FieldError;
use crate::types::{Field, FieldErrors, FormData};

/// smallest loan a lender will quote
pub const MIN_LOAN_AMOUNT: Decimal = dec!(2000);
/// shortest term in years
pub const MIN_LOAN_TERM: Decimal = dec!(1);
/// longest term in years
pub const MAX_LOAN_TERM: Decimal = dec!(7);

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s-]+$").expect("Invalid first name regex"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid email regex"));

type Rule = fn(&str) -> Result<(), FieldError>;

/// validation rule per field, in `Field::ALL` order
pub const RULES: [(Field, Rule); 4] = [
    (Field::FirstName, check_first_name),
    (Field::EmailAddress, check_email_address),
    (Field::LoanAmount, check_loan_amount),
    (Field::LoanTerm, check_loan_term),
];

fn rule_for(field: Field) -> Rule {
    RULES[field as usize].1
}

/// run the rule for `field` against its raw text
pub fn check(field: Field, raw: &str) -> Result<(), FieldError> {
    rule_for(field)(raw)
}

/// error message for `field`, or an empty string when the value is valid
pub fn validate(field: Field, raw: &str) -> String {
    match check(field, raw) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// validate every field, keeping only the ones that failed
pub fn validate_all(data: &FormData) -> FieldErrors {
    Field::ALL
        .iter()
        .filter_map(|field| {
            let message = validate(*field, data.get(*field));
            (!message.is_empty()).then_some((*field, message))
        })
        .collect()
}

fn check_first_name(raw: &str) -> Result<(), FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::FirstNameRequired);
    }
    if !NAME_PATTERN.is_match(raw) {
        return Err(FieldError::FirstNameInvalid);
    }
    Ok(())
}

fn check_email_address(raw: &str) -> Result<(), FieldError> {
    if raw.is_empty() {
        return Err(FieldError::EmailRequired);
    }
    if !EMAIL_PATTERN.is_match(raw) {
        return Err(FieldError::EmailInvalid);
    }
    Ok(())
}

fn check_loan_amount(raw: &str) -> Result<(), FieldError> {
    if raw.is_empty() {
        return Err(FieldError::LoanAmountRequired);
    }
    let amount = parse_number(raw).ok_or(FieldError::LoanAmountNotNumeric)?;
    if amount < MIN_LOAN_AMOUNT {
        return Err(FieldError::LoanAmountTooSmall);
    }
    Ok(())
}

fn check_loan_term(raw: &str) -> Result<(), FieldError> {
    if raw.is_empty() {
        return Err(FieldError::LoanTermRequired);
    }
    let term = parse_number(raw).ok_or(FieldError::LoanTermNotNumeric)?;
    if term < MIN_LOAN_TERM || term > MAX_LOAN_TERM {
        return Err(FieldError::LoanTermOutOfRange);
    }
    Ok(())
}

/// parse numeric form text
///
/// Surrounding whitespace is ignored and blank text reads as zero, so a
/// whitespace-only amount fails the range rule rather than the parse rule.
/// Scientific notation (`2e3`) is accepted; digit separators (`1_000`) are not.
pub fn parse_number(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    Decimal::from_str(unsigned)
        .or_else(|_| Decimal::from_scientific(unsigned))
        .ok()
}
