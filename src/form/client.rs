use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::errors::{OfferError, Result};
use crate::types::{LoanOffer, OfferRequest};

/// transport used by the form to fetch offers
#[async_trait]
pub trait OfferClient: Send + Sync {
    async fn fetch_offers(&self, request: &OfferRequest) -> Result<Vec<LoanOffer>>;
}

/// offer client talking to a running offer service over http
#[derive(Debug, Clone)]
pub struct HttpOfferClient {
    client: Client,
    base_url: String,
}

impl HttpOfferClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn offers_url(&self) -> String {
        format!("{}/api/offers", self.base_url)
    }
}

#[async_trait]
impl OfferClient for HttpOfferClient {
    async fn fetch_offers(&self, request: &OfferRequest) -> Result<Vec<LoanOffer>> {
        let url = self.offers_url();
        debug!(%url, "requesting loan offers");

        let response = self.client.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(OfferError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json::<Vec<LoanOffer>>().await?)
    }
}
