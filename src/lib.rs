pub mod config;
pub mod decimal;
pub mod errors;
pub mod form;
pub mod offers;
pub mod payments;
pub mod server;
pub mod types;
pub mod validation;

// re-export key types
pub use config::{LenderConfig, OfferConfig, ServerConfig};
pub use decimal::{Money, Rate};
pub use errors::{FieldError, OfferError, Result};
pub use form::{FormController, HttpOfferClient, OfferClient, Phase, SubmitOutcome};
pub use offers::{Application, OfferService};
pub use payments::{monthly_payment, AmortizationSchedule, ScheduledPayment};
pub use server::build_router;
pub use types::{Field, FieldErrors, FormData, LoanOffer, OfferRequest, TouchedState};
pub use validation::{validate, validate_all};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
