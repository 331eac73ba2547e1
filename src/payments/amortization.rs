use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{OfferError, Result};

/// monthly repayment for a fully amortizing loan, rounded to cents
///
/// `term_years` may be fractional; the payment count is `term_years * 12`.
pub fn monthly_payment(principal: Money, annual_rate: Rate, term_years: Decimal) -> Result<Money> {
    let months = payment_count(term_years)?;
    if months.is_zero() {
        return Err(OfferError::Calculation {
            message: "loan term must be non-zero".to_string(),
        });
    }

    let r = annual_rate.monthly_rate().as_decimal();

    if r.is_zero() {
        let payment = principal
            .as_decimal()
            .checked_div(months)
            .ok_or_else(|| OfferError::Calculation {
                message: format!("monthly payment overflow for principal {principal}"),
            })?;
        return Ok(Money::from_decimal(payment).round_cents());
    }

    // P * r * (1 + r)^n / ((1 + r)^n - 1)
    let compound = compound_factor(Decimal::ONE + r, months)?;
    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(OfferError::Calculation {
            message: format!("degenerate compounding factor for {months} payments"),
        });
    }

    let payment = principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|v| v.checked_mul(compound))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| OfferError::Calculation {
            message: format!("monthly payment overflow for principal {principal}"),
        })?;

    Ok(Money::from_decimal(payment).round_cents())
}

/// number of monthly payments in `term_years`
fn payment_count(term_years: Decimal) -> Result<Decimal> {
    term_years
        .checked_mul(dec!(12))
        .ok_or_else(|| OfferError::Calculation {
            message: format!("unsupported loan term of {term_years} years"),
        })
}

/// `base^months`, exact for whole months
fn compound_factor(base: Decimal, months: Decimal) -> Result<Decimal> {
    let factor = if months.fract().is_zero() {
        months.to_i64().and_then(|n| base.checked_powi(n))
    } else {
        base.checked_powd(months)
    };

    factor.ok_or_else(|| OfferError::Calculation {
        message: format!("compounding overflow over {months} payments"),
    })
}

/// scheduled payment in amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
}

/// month-by-month repayment plan for a fixed monthly payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub interest_rate: Rate,
    pub monthly_payment: Money,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate payment schedule, first payment one month after `start_date`
    ///
    /// A fractional final month is paid as a whole month; the last payment
    /// absorbs whatever balance rounding left behind.
    pub fn generate(
        principal: Money,
        interest_rate: Rate,
        term_years: Decimal,
        start_date: NaiveDate,
    ) -> Result<Self> {
        let payment = monthly_payment(principal, interest_rate, term_years)?;
        let term_months = payment_count(term_years)?
            .ceil()
            .to_u32()
            .filter(|months| *months > 0)
            .ok_or_else(|| OfferError::Calculation {
                message: format!("unsupported loan term of {term_years} years"),
            })?;
        let monthly_rate = interest_rate.monthly_rate().as_decimal();

        let mut payments = Vec::with_capacity(term_months as usize);
        let mut balance = principal;

        for i in 1..=term_months {
            let payment_date = start_date
                .checked_add_months(Months::new(i))
                .ok_or_else(|| OfferError::Calculation {
                    message: format!("payment {i} falls outside the calendar"),
                })?;
            let interest_portion = (balance * monthly_rate).round_cents();
            let mut principal_portion = payment - interest_portion;

            if i == term_months || principal_portion > balance {
                principal_portion = balance;
            }

            let payment_amount = principal_portion + interest_portion;
            let ending_balance = balance - principal_portion;

            payments.push(ScheduledPayment {
                payment_number: i,
                payment_date,
                beginning_balance: balance,
                payment_amount,
                principal_portion,
                interest_portion,
                ending_balance,
            });

            balance = ending_balance;
            if balance.is_zero() {
                break;
            }
        }

        let total_interest = payments
            .iter()
            .map(|p| p.interest_portion)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_payment = payments
            .iter()
            .map(|p| p.payment_amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        Ok(Self {
            principal,
            interest_rate,
            monthly_payment: payment,
            payments,
            total_interest,
            total_payment,
        })
    }

    /// get payment for specific period
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        let index = payment_number.checked_sub(1)?;
        self.payments.get(index as usize)
    }

    pub fn term_months(&self) -> u32 {
        self.payments.len() as u32
    }
}
