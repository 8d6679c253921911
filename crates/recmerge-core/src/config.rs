//! Configuration for duplicate detection
//!
//! Groups the inclusion threshold and every field rule used by the scorers.
//! All values default to the named constants in [`crate::scoring`] and
//! [`crate::cluster`], so an empty TOML document is a valid config.
//!
//! ```toml
//! threshold = 75
//!
//! [contact.email]
//! exact = 100.0
//! tiers = [{ min = 85, factor = 1.0 }]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cluster::DEFAULT_THRESHOLD;
use crate::error::{RecmergeError, Result};
use crate::scoring::{
    ContactScorer, ContactScoring, OrderScorer, OrderScoring, ProductScorer, ProductScoring,
};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecmergeConfig {
    /// Minimum pair score (percent) for two records to be grouped
    pub threshold: u8,
    /// Contact field rules
    pub contact: ContactScoring,
    /// Order field rules
    pub order: OrderScoring,
    /// Product field rules
    pub product: ProductScoring,
}

impl Default for RecmergeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            contact: ContactScoring::default(),
            order: OrderScoring::default(),
            product: ProductScoring::default(),
        }
    }
}

impl RecmergeConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    pub fn validate(&self) -> Result<()> {
        check_threshold(u32::from(self.threshold))?;
        Ok(())
    }

    pub fn contact_scorer(&self) -> ContactScorer {
        ContactScorer::new(self.contact.clone())
    }

    pub fn order_scorer(&self) -> OrderScorer {
        OrderScorer::new(self.order.clone())
    }

    pub fn product_scorer(&self) -> ProductScorer {
        ProductScorer::new(self.product.clone())
    }
}

/// Accept a threshold from user input, rejecting anything above 100.
pub fn check_threshold(value: u32) -> Result<u8> {
    if value > 100 {
        return Err(RecmergeError::InvalidThreshold(value));
    }
    Ok(value as u8)
}
