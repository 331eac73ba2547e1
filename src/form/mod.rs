pub mod client;
pub mod controller;
pub mod render;

pub use client::{HttpOfferClient, OfferClient};
pub use controller::{FormController, Phase, SubmitOutcome, SUBMIT_FAILED_ALERT};
pub use render::{render_form, render_offers};
