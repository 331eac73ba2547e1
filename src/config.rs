use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

use crate::decimal::Rate;
use crate::errors::{OfferError, Result};

/// port the offer service listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 5000;

/// a lender quoted on every application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderConfig {
    pub name: String,
    pub interest_rate: Rate,
    pub fees: String,
}

impl LenderConfig {
    pub fn new(name: impl Into<String>, interest_rate: Rate, fees: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interest_rate,
            fees: fees.into(),
        }
    }
}

/// offer calculation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferConfig {
    /// lenders in the order their offers are returned
    pub lenders: Vec<LenderConfig>,
    /// also apply the form's range rules server side
    pub enforce_ranges: bool,
}

impl OfferConfig {
    /// the three fixed lenders quoted by the comparison tool
    pub fn standard_lenders() -> Vec<LenderConfig> {
        vec![
            LenderConfig::new(
                "Lender A",
                Rate::from_percentage(dec!(5.5)),
                "No processing fees",
            ),
            LenderConfig::new(
                "Lender B",
                Rate::from_percentage(dec!(5.2)),
                "$20 application fee",
            ),
            LenderConfig::new(
                "Lender C",
                Rate::from_percentage(dec!(6.0)),
                "No hidden charges",
            ),
        ]
    }

    pub fn with_enforced_ranges(mut self, enforce: bool) -> Self {
        self.enforce_ranges = enforce;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.lenders.is_empty() {
            return Err(OfferError::InvalidConfiguration {
                message: "at least one lender is required".to_string(),
            });
        }
        if let Some(lender) = self.lenders.iter().find(|l| l.interest_rate < Rate::ZERO) {
            return Err(OfferError::InvalidConfiguration {
                message: format!("lender {} has a negative interest rate", lender.name),
            });
        }
        Ok(())
    }
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            lenders: Self::standard_lenders(),
            enforce_ranges: false,
        }
    }
}

/// http server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub offers: OfferConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            offers: OfferConfig::default(),
        }
    }
}
