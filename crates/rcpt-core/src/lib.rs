//! Core library for turning OCR receipt text into structured data.
//!
//! This crate provides:
//! - Line classification (products versus totals, tenders, promotions)
//! - Item name cleanup and quantity/weight handling
//! - Hierarchical (combo/modifier) and flat (tabular) layout parsing
//! - Merchant, date and total extraction

pub mod error;
pub mod models;
pub mod receipt;

use lazy_static::lazy_static;

pub use error::{LexiconError, RcptError, Result};
pub use models::config::{ExtractionConfig, ParserConfig};
pub use models::lexicon::{Lexicon, LEXICON_VERSION};
pub use models::receipt::{ParsedItem, ReceiptLayout, ReceiptSummary};
pub use receipt::{ReceiptExtractor, ReceiptParser, StructuringParser};

lazy_static! {
    static ref DEFAULT_PARSER: ReceiptParser = ReceiptParser::new();
}

/// Extract line items with the default parser.
pub fn parse_items(text: &str) -> Vec<ParsedItem> {
    DEFAULT_PARSER.parse_items(text)
}

/// Extract items and receipt metadata with the default parser.
pub fn parse_receipt(text: &str) -> ReceiptSummary {
    DEFAULT_PARSER.parse_receipt(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parser_entry_points() {
        let text = "Milk 3.50\nTOTAL 3.50";
        assert_eq!(parse_items(text).len(), 1);

        let summary = parse_receipt(text);
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.layout, ReceiptLayout::Hierarchical);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = parse_receipt("Coffee 2.50\nTotal 2.50");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["items"][0]["name"], "Coffee");
        assert_eq!(json["layout"], "hierarchical");
    }
}
