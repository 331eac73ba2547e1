pub mod amortization;

pub use amortization::{monthly_payment, AmortizationSchedule, ScheduledPayment};
