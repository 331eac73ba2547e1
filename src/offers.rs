use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::OfferConfig;
use crate::decimal::Money;
use crate::errors::{OfferError, Result};
use crate::payments::monthly_payment;
use crate::types::{Field, LoanOffer, OfferRequest};
use crate::validation;

/// a request that passed the presence check
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub first_name: String,
    pub email_address: String,
    pub loan_amount: Decimal,
    pub loan_term: Decimal,
}

impl TryFrom<&OfferRequest> for Application {
    type Error = OfferError;

    /// fails when any field is absent, empty, or zero
    fn try_from(request: &OfferRequest) -> Result<Self> {
        let text = |value: &Option<String>| value.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);
        let number = |value: Option<Decimal>| value.filter(|n| !n.is_zero());

        match (
            text(&request.first_name),
            text(&request.email_address),
            number(request.loan_amount),
            number(request.loan_term),
        ) {
            (Some(first_name), Some(email_address), Some(loan_amount), Some(loan_term)) => {
                Ok(Self {
                    first_name,
                    email_address,
                    loan_amount,
                    loan_term,
                })
            }
            _ => Err(OfferError::MissingFields),
        }
    }
}

impl Application {
    /// apply the form's rules to the submitted values
    pub fn check_ranges(&self) -> Result<()> {
        let values = [
            (Field::FirstName, self.first_name.clone()),
            (Field::EmailAddress, self.email_address.clone()),
            (Field::LoanAmount, self.loan_amount.to_string()),
            (Field::LoanTerm, self.loan_term.to_string()),
        ];
        for (field, raw) in values {
            validation::check(field, &raw)
                .map_err(|source| OfferError::InvalidField { field, source })?;
        }
        Ok(())
    }
}

/// stateless quote engine, one offer per configured lender
#[derive(Debug, Clone)]
pub struct OfferService {
    config: Arc<OfferConfig>,
}

impl OfferService {
    pub fn new(config: OfferConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// quote every lender for the request, in lender table order
    ///
    /// Numeric ranges are only checked when `enforce_ranges` is set; by
    /// default the caller is trusted to have applied the form rules.
    pub fn quote(&self, request: &OfferRequest) -> Result<Vec<LoanOffer>> {
        let quote_id = Uuid::new_v4();
        let application = Application::try_from(request)?;

        if self.config.enforce_ranges {
            application.check_ranges()?;
        }

        let principal = Money::from_decimal(application.loan_amount);
        let offers = self
            .config
            .lenders
            .iter()
            .map(|lender| {
                let monthly_repayment =
                    monthly_payment(principal, lender.interest_rate, application.loan_term)?;
                debug!(%quote_id, lender = %lender.name, %monthly_repayment, "priced lender");
                Ok(LoanOffer {
                    lender_name: lender.name.clone(),
                    monthly_repayment,
                    interest_rate: lender.interest_rate.as_percentage(),
                    fees: lender.fees.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            %quote_id,
            amount = %principal,
            term_years = %application.loan_term,
            offers = offers.len(),
            "quoted loan offers"
        );

        Ok(offers)
    }
}

impl Default for OfferService {
    fn default() -> Self {
        Self {
            config: Arc::new(OfferConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldError;
    use rust_decimal_macros::dec;

    fn jane() -> OfferRequest {
        OfferRequest {
            first_name: Some("Jane".to_string()),
            email_address: Some("j@x.com".to_string()),
            loan_amount: Some(dec!(5000)),
            loan_term: Some(dec!(3)),
        }
    }

    #[test]
    fn test_quote_returns_three_ordered_offers() {
        let offers = OfferService::default().quote(&jane()).unwrap();

        assert_eq!(offers.len(), 3);
        let names: Vec<&str> = offers.iter().map(|o| o.lender_name.as_str()).collect();
        assert_eq!(names, ["Lender A", "Lender B", "Lender C"]);

        for offer in &offers {
            let repayment = offer.monthly_repayment.as_decimal();
            assert!(!offer.monthly_repayment.is_negative());
            assert_eq!(repayment, repayment.round_dp(2));
        }

        assert_eq!(offers[0].monthly_repayment, Money::from_minor(15098));
        assert_eq!(offers[0].interest_rate, dec!(5.5));
        assert_eq!(offers[1].fees, "$20 application fee");
        assert_eq!(offers[2].interest_rate, dec!(6));
    }

    #[test]
    fn test_missing_or_falsy_fields_are_rejected() {
        let service = OfferService::default();
        let cases = [
            OfferRequest { first_name: None, ..jane() },
            OfferRequest { first_name: Some(String::new()), ..jane() },
            OfferRequest { email_address: None, ..jane() },
            OfferRequest { loan_amount: None, ..jane() },
            OfferRequest { loan_amount: Some(Decimal::ZERO), ..jane() },
            OfferRequest { loan_term: None, ..jane() },
            OfferRequest { loan_term: Some(Decimal::ZERO), ..jane() },
            OfferRequest::default(),
        ];

        for request in cases {
            let err = service.quote(&request).unwrap_err();
            assert!(matches!(err, OfferError::MissingFields), "{request:?}");
            assert_eq!(err.to_string(), "All fields are required");
        }
    }

    #[test]
    fn test_ranges_are_trusted_by_default() {
        let request = OfferRequest {
            loan_amount: Some(dec!(500)),
            loan_term: Some(dec!(10)),
            ..jane()
        };
        let offers = OfferService::default().quote(&request).unwrap();
        assert_eq!(offers.len(), 3);
    }

    #[test]
    fn test_enforced_ranges_reject_out_of_range_values() {
        let service =
            OfferService::new(OfferConfig::default().with_enforced_ranges(true)).unwrap();

        let request = OfferRequest {
            loan_amount: Some(dec!(500)),
            ..jane()
        };
        let err = service.quote(&request).unwrap_err();
        assert!(matches!(
            err,
            OfferError::InvalidField {
                field: Field::LoanAmount,
                source: FieldError::LoanAmountTooSmall,
            }
        ));
        assert_eq!(err.to_string(), "Loan amount must be at least $2000.");

        assert!(service.quote(&jane()).is_ok());
    }

    #[test]
    fn test_quotes_are_stateless() {
        let service = OfferService::default();
        assert_eq!(service.quote(&jane()).unwrap(), service.quote(&jane()).unwrap());
    }
}
