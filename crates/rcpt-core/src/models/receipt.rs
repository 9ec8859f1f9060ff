//! Receipt data models produced by the parser.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::receipt::rules::quantities::compute_unit_price;

/// A single purchased line extracted from a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedItem {
    /// Cleaned, title-cased item name (at least 3 characters).
    pub name: String,

    /// Quantity; fractional when derived from a weight in kilograms.
    pub quantity: Decimal,

    /// Line total in the receipt's currency.
    pub price: Decimal,

    /// `price / quantity`, or `price` when the quantity is not positive.
    pub unit_price: Decimal,

    /// Unit of the quantity when it came from a weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// How strongly the name looked like a product (0.0 - 1.0).
    pub confidence: f32,

    /// Original OCR line, kept for auditing.
    pub source_line: String,

    /// Position of the source line among the non-blank receipt lines.
    pub line_index: usize,
}

impl ParsedItem {
    pub fn new(
        name: impl Into<String>,
        quantity: Decimal,
        price: Decimal,
        source_line: impl Into<String>,
        line_index: usize,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
            unit_price: compute_unit_price(price, quantity),
            unit: None,
            confidence: 0.0,
            source_line: source_line.into(),
            line_index,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Replace the quantity with a weight in kilograms and recompute the unit price.
    pub fn apply_weight(&mut self, kilograms: Decimal) {
        if kilograms <= Decimal::ZERO {
            return;
        }
        self.quantity = kilograms;
        self.unit = Some("kg".to_string());
        self.unit_price = compute_unit_price(self.price, self.quantity);
    }

    /// Whether the quantity already came from a weight line.
    pub fn is_weighed(&self) -> bool {
        self.unit.is_some()
    }
}

/// Which structuring strategy produced the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptLayout {
    /// Indented groups (combo headers with sub-items).
    Hierarchical,
    /// One item per line, possibly tabular.
    Flat,
    /// Nothing could be extracted.
    #[default]
    Empty,
}

/// Items plus receipt-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceiptSummary {
    /// Extracted line items.
    pub items: Vec<ParsedItem>,

    /// Merchant or store name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,

    /// Transaction date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Subtotal; back-computed as `total - tax` when not stated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Decimal>,

    /// Sum of all tax lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<Decimal>,

    /// Largest total seen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,

    /// Structuring strategy that produced `items`.
    pub layout: ReceiptLayout,

    /// Number of non-blank lines in the input.
    pub line_count: usize,

    /// Extraction warnings for the review UI.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ReceiptSummary {
    /// Sum of all item line totals.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|i| i.price).sum()
    }

    /// Date formatted as `YYYY-MM-DD`.
    pub fn date_iso(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Check the metadata for inconsistencies worth flagging to a reviewer.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.items.is_empty() {
            issues.push("No items extracted".to_string());
        }
        if self.total.is_none() {
            issues.push("No total found".to_string());
        }
        if let (Some(total), Some(subtotal)) = (self.total, self.subtotal) {
            if total < subtotal {
                issues.push(format!(
                    "Total {} is smaller than subtotal {}",
                    total, subtotal
                ));
            }
        }
        if self.subtotal.is_some_and(|s| s < Decimal::ZERO) {
            issues.push("Back-computed subtotal is negative".to_string());
        }

        issues
    }
}
