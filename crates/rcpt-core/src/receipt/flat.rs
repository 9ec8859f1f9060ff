//! One item per line structuring, including tabular invoices.

use rust_decimal::Decimal;
use tracing::trace;

use super::items::{ItemCollector, ItemRules};
use super::lines::ReceiptLine;
use super::rules::patterns::HAS_DIGIT;
use super::StructuringParser;
use crate::models::receipt::{ParsedItem, ReceiptLayout};

/// Fallback strategy: every priced line is considered on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatParser;

impl FlatParser {
    pub fn new() -> Self {
        Self
    }
}

impl StructuringParser for FlatParser {
    fn layout(&self) -> ReceiptLayout {
        ReceiptLayout::Flat
    }

    fn structure(&self, rules: &ItemRules, lines: &[ReceiptLine]) -> Vec<ParsedItem> {
        let mut items = ItemCollector::default();

        for line in lines {
            if line.text.chars().count() < 3 {
                continue;
            }
            if rules.absorb_weight_line(line, &mut items) {
                continue;
            }
            if rules.classifier.is_non_item(&line.text) {
                trace!(line = %line.text, "non-item");
                continue;
            }
            if !HAS_DIGIT.is_match(&line.text) {
                continue;
            }

            // raw keeps the column gaps of tabular rows
            match rules.candidate(&line.raw) {
                Some(candidate) if candidate.price > Decimal::ZERO => {
                    rules.accept(&mut items, line, candidate, None);
                }
                _ => trace!(line = %line.text, "no usable price"),
            }
        }

        items.into_items()
    }
}
