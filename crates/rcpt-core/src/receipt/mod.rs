//! Receipt structuring: items, totals, date and merchant.

mod flat;
mod hierarchical;
mod items;
pub mod lines;
mod parser;
pub mod rules;

pub use flat::FlatParser;
pub use hierarchical::HierarchicalParser;
pub use items::{Candidate, ItemCollector, ItemRules};
pub use lines::{split_lines, ReceiptLine};
pub use parser::ReceiptParser;

use crate::models::receipt::{ParsedItem, ReceiptLayout, ReceiptSummary};

/// Trait for turning receipt lines into items under one layout assumption.
pub trait StructuringParser {
    /// Layout reported when this strategy produced the items.
    fn layout(&self) -> ReceiptLayout;

    /// Extract items; an empty result lets the next strategy try.
    fn structure(&self, rules: &ItemRules, lines: &[ReceiptLine]) -> Vec<ParsedItem>;
}

/// Trait for receipt parsers used by the surrounding service.
pub trait ReceiptExtractor {
    /// Extract line items only.
    fn extract_items(&self, text: &str) -> Vec<ParsedItem>;

    /// Extract items plus merchant, date and totals.
    fn extract_summary(&self, text: &str) -> ReceiptSummary;
}
