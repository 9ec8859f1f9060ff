//! Configuration structures for the receipt parser.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RcptError, Result};
use crate::models::lexicon::Lexicon;

/// Main configuration for the rcpt parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Extraction thresholds.
    pub extraction: ExtractionConfig,

    /// Keyword tables.
    pub lexicon: Lexicon,
}

/// Thresholds and switches for item and metadata extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Smallest amount accepted as a price or total.
    pub min_amount: Decimal,

    /// Largest amount accepted; bigger numbers are treated as codes.
    pub max_amount: Decimal,

    /// Minimum length of a cleaned item name.
    pub min_name_len: usize,

    /// How many leading non-blank lines are searched for the merchant.
    pub merchant_scan_lines: usize,

    /// Longest all-caps line accepted as a merchant name.
    pub merchant_max_caps_len: usize,

    /// Two-digit years below this map to 20xx, others to 19xx.
    pub two_digit_year_pivot: u32,

    /// Fold "0.442kg NET @ $2.99/kg" lines into the item above.
    pub merge_weight_lines: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_amount: Decimal::new(1, 2),
            max_amount: Decimal::from(999_999),
            min_name_len: 3,
            merchant_scan_lines: 5,
            merchant_max_caps_len: 40,
            two_digit_year_pivot: 50,
            merge_weight_lines: true,
        }
    }
}

impl ExtractionConfig {
    /// Reject settings that would make every line fail.
    pub fn validate(&self) -> Result<()> {
        if self.min_amount <= Decimal::ZERO {
            return Err(RcptError::Config(format!(
                "min_amount must be positive, got {}",
                self.min_amount
            )));
        }
        if self.max_amount < self.min_amount {
            return Err(RcptError::Config(format!(
                "max_amount {} is below min_amount {}",
                self.max_amount, self.min_amount
            )));
        }
        if self.min_name_len == 0 {
            return Err(RcptError::Config("min_name_len must be at least 1".into()));
        }
        if self.merchant_scan_lines == 0 {
            return Err(RcptError::Config(
                "merchant_scan_lines must be at least 1".into(),
            ));
        }
        if self.two_digit_year_pivot > 99 {
            return Err(RcptError::Config(format!(
                "two_digit_year_pivot must be below 100, got {}",
                self.two_digit_year_pivot
            )));
        }
        Ok(())
    }
}

impl ParserConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate thresholds and lexicon tables.
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        self.lexicon.validate()?;
        Ok(())
    }
}
