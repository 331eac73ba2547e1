use tracing::{info, warn};

use crate::errors::Result;
use crate::types::{Field, FieldErrors, FormData, LoanOffer, OfferRequest, TouchedState};
use crate::validation::{self, parse_number};

use super::client::OfferClient;

/// message shown when offers cannot be fetched
pub const SUBMIT_FAILED_ALERT: &str = "Something went wrong, please try again.";

/// where the form is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitting,
    Displaying,
}

/// result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// validation failed, nothing was sent
    Blocked(FieldErrors),
    /// offers were received and the form was reset
    Offers(Vec<LoanOffer>),
    /// the request failed; the form kept its data
    Failed { alert: &'static str },
}

/// local state of the loan application form
#[derive(Debug, Clone)]
pub struct FormController {
    data: FormData,
    errors: FieldErrors,
    touched: TouchedState,
    offers: Vec<LoanOffer>,
    phase: Phase,
}

impl FormController {
    pub fn new() -> Self {
        Self {
            data: FormData::default(),
            errors: FieldErrors::new(),
            touched: TouchedState::new(),
            offers: Vec::new(),
            phase: Phase::Editing,
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn offers(&self) -> &[LoanOffer] {
        &self.offers
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.get(&field).copied().unwrap_or(false)
    }

    /// error to show next to `field`, only once it has been touched
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if !self.is_touched(field) {
            return None;
        }
        self.errors
            .get(&field)
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }

    /// store raw input and revalidate the field
    pub fn change(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.errors.insert(field, validation::validate(field, &value));
        self.touched.insert(field, true);
        self.data.set(field, value);
        self.phase = Phase::Editing;
    }

    /// mark the field touched and revalidate what it holds
    pub fn blur(&mut self, field: Field) {
        let message = validation::validate(field, self.data.get(field));
        self.errors.insert(field, message);
        self.touched.insert(field, true);
    }

    /// submit gate: no outstanding error and every field filled in
    pub fn can_submit(&self) -> bool {
        self.errors.values().all(|message| message.is_empty()) && self.data.is_complete()
    }

    /// validate everything and, if clean, fetch offers through `client`
    pub async fn submit<C: OfferClient + ?Sized>(&mut self, client: &C) -> SubmitOutcome {
        let errors = validation::validate_all(&self.data);
        if !errors.is_empty() {
            self.touched = Field::ALL.iter().map(|field| (*field, true)).collect();
            self.errors = errors.clone();
            self.phase = Phase::Editing;
            return SubmitOutcome::Blocked(errors);
        }

        self.phase = Phase::Submitting;
        match self.send(client).await {
            Ok(offers) => {
                info!(offers = offers.len(), "received loan offers");
                self.offers = offers.clone();
                self.reset();
                self.phase = Phase::Displaying;
                SubmitOutcome::Offers(offers)
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch loan offers");
                self.phase = Phase::Editing;
                SubmitOutcome::Failed {
                    alert: SUBMIT_FAILED_ALERT,
                }
            }
        }
    }

    /// body sent to the offer service, numeric fields converted from text
    pub fn request(&self) -> OfferRequest {
        OfferRequest {
            first_name: Some(self.data.first_name.clone()),
            email_address: Some(self.data.email_address.clone()),
            loan_amount: parse_number(&self.data.loan_amount),
            loan_term: parse_number(&self.data.loan_term),
        }
    }

    async fn send<C: OfferClient + ?Sized>(&self, client: &C) -> Result<Vec<LoanOffer>> {
        client.fetch_offers(&self.request()).await
    }

    fn reset(&mut self) {
        self.data = FormData::default();
        self.errors.clear();
        self.touched.clear();
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::OfferError;
    use crate::offers::OfferService;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// prices requests in-process and remembers what it was sent
    #[derive(Default)]
    struct LocalClient {
        service: OfferService,
        sent: Mutex<Vec<OfferRequest>>,
    }

    #[async_trait]
    impl OfferClient for LocalClient {
        async fn fetch_offers(&self, request: &OfferRequest) -> Result<Vec<LoanOffer>> {
            self.sent.lock().unwrap().push(request.clone());
            self.service.quote(request)
        }
    }

    struct DownClient;

    #[async_trait]
    impl OfferClient for DownClient {
        async fn fetch_offers(&self, _request: &OfferRequest) -> Result<Vec<LoanOffer>> {
            Err(OfferError::Transport {
                message: "connection refused".to_string(),
            })
        }
    }

    fn filled() -> FormController {
        let mut form = FormController::new();
        form.change(Field::FirstName, "Jane");
        form.change(Field::EmailAddress, "j@x.com");
        form.change(Field::LoanAmount, "5000");
        form.change(Field::LoanTerm, "3");
        form
    }

    #[test]
    fn test_change_validates_and_touches_field() {
        let mut form = FormController::new();
        assert_eq!(form.visible_error(Field::LoanAmount), None);

        form.change(Field::LoanAmount, "100");

        assert!(form.is_touched(Field::LoanAmount));
        assert_eq!(form.data().loan_amount, "100");
        assert_eq!(
            form.visible_error(Field::LoanAmount),
            Some("Loan amount must be at least $2000.")
        );

        form.change(Field::LoanAmount, "2500");
        assert_eq!(form.visible_error(Field::LoanAmount), None);
        assert_eq!(form.phase(), Phase::Editing);
    }

    #[test]
    fn test_blur_reveals_required_error() {
        let mut form = FormController::new();
        form.blur(Field::FirstName);
        assert_eq!(form.visible_error(Field::FirstName), Some("First name is required."));
        assert!(!form.is_touched(Field::EmailAddress));
    }

    #[test]
    fn test_submit_gate_requires_every_field() {
        let mut form = FormController::new();
        assert!(!form.can_submit());

        form.change(Field::FirstName, "Jane");
        form.change(Field::EmailAddress, "j@x.com");
        form.change(Field::LoanAmount, "5000");
        assert!(!form.can_submit());

        form.change(Field::LoanTerm, "8");
        assert!(!form.can_submit());

        form.change(Field::LoanTerm, "3");
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn test_invalid_submit_touches_everything_and_sends_nothing() {
        let client = LocalClient::default();
        let mut form = FormController::new();
        form.change(Field::FirstName, "Jane");

        let outcome = form.submit(&client).await;

        match outcome {
            SubmitOutcome::Blocked(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected blocked submit, got {other:?}"),
        }
        assert_eq!(form.phase(), Phase::Editing);
        for field in Field::ALL {
            assert!(form.is_touched(field));
        }
        assert_eq!(form.visible_error(Field::LoanTerm), Some("Loan term is required."));
        assert_eq!(form.visible_error(Field::FirstName), None);
        assert!(client.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submit_displays_offers_and_resets() {
        let client = LocalClient::default();
        let mut form = filled();

        let outcome = form.submit(&client).await;

        let SubmitOutcome::Offers(offers) = outcome else {
            panic!("expected offers");
        };
        assert_eq!(offers.len(), 3);
        assert_eq!(form.offers(), offers.as_slice());
        assert_eq!(form.phase(), Phase::Displaying);
        assert_eq!(form.data(), &FormData::default());
        assert!(form.errors().is_empty());
        assert!(!form.is_touched(Field::FirstName));

        let sent = client.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].loan_amount, Some(dec!(5000)));
        assert_eq!(sent[0].loan_term, Some(dec!(3)));
        assert_eq!(sent[0].first_name.as_deref(), Some("Jane"));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form_and_previous_offers() {
        let mut form = filled();
        form.submit(&LocalClient::default()).await;
        let previous = form.offers().to_vec();

        form.change(Field::FirstName, "Ann");
        form.change(Field::EmailAddress, "ann@x.com");
        form.change(Field::LoanAmount, "9000");
        form.change(Field::LoanTerm, "5");
        assert_eq!(form.phase(), Phase::Editing);

        let outcome = form.submit(&DownClient).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                alert: SUBMIT_FAILED_ALERT
            }
        );
        assert_eq!(form.phase(), Phase::Editing);
        assert_eq!(form.offers(), previous.as_slice());
        assert_eq!(form.data().first_name, "Ann");
        assert_eq!(form.data().loan_amount, "9000");
        assert!(form.can_submit());
    }
}
