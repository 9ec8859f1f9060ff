//! Indentation-aware structuring for combo and modifier layouts.
//!
//! ```text
//!   1 Buy One, Get One        3.99   <- header, price shared by children
//!     1 Sausage Egg McMuffin         <- sub-item, inherits 3.99
//!   1 2 Burritos EVM          6.99   <- direct item
//!       1 S Coffee                   <- sub-item of a direct item
//!         ADD Cream                  <- modifier, dropped
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::items::{Candidate, ItemCollector, ItemRules};
use super::lines::ReceiptLine;
use super::StructuringParser;
use crate::models::receipt::{ParsedItem, ReceiptLayout};

/// Line that opened an indentation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKind {
    /// Administrative or promotional line; never an item itself.
    Header,
    /// Accepted item whose children are sides or modifiers.
    Item,
}

#[derive(Debug, Clone, Copy)]
struct Group {
    kind: GroupKind,
    indent: usize,
    price: Option<Decimal>,
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Scanning,
    Expanding(Group),
}

/// Structuring strategy for receipts with indented sub-items.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalParser;

impl HierarchicalParser {
    pub fn new() -> Self {
        Self
    }

    /// Handle a line at group level. Returns the state for the next line.
    fn scan(&self, rules: &ItemRules, line: &ReceiptLine, items: &mut ItemCollector) -> ScanState {
        if rules.absorb_weight_line(line, items) || !line.has_price {
            return ScanState::Scanning;
        }

        let fields = rules.fields(&line.text);
        let name = rules.cleaner.clean(&fields.remainder);

        if rules.classifier.is_non_item(&line.text) || rules.classifier.is_non_item(&name) {
            debug!(line = %line.text, "group header");
            return ScanState::Expanding(Group {
                kind: GroupKind::Header,
                indent: line.indent,
                price: fields.price,
            });
        }

        let Some(price) = fields.price else {
            trace!(line = %line.text, "no usable price");
            return ScanState::Scanning;
        };

        let candidate = Candidate {
            name,
            quantity: fields.quantity,
            price,
            weight: fields.weight.as_ref().map(|w| w.kilograms()),
        };
        rules.accept(items, line, candidate, None);

        ScanState::Expanding(Group {
            kind: GroupKind::Item,
            indent: line.indent,
            price: Some(price),
        })
    }

    /// Handle a line indented deeper than its group.
    fn expand(&self, rules: &ItemRules, group: &Group, line: &ReceiptLine, items: &mut ItemCollector) {
        if rules.classifier.is_modifier(&line.text) {
            trace!(line = %line.text, "modifier dropped");
            return;
        }
        if rules.absorb_weight_line(line, items) {
            return;
        }

        let candidate = if line.has_price {
            // Own price: independent item.
            rules.candidate(&line.text)
        } else {
            group.price.map(|price| {
                Candidate::new(rules.cleaner.clean_sub_item(&line.text), Decimal::ONE, price)
            })
        };

        match candidate {
            Some(candidate) if candidate.price > Decimal::ZERO => {
                trace!(line = %line.text, parent = ?group.kind, "sub-item");
                rules.accept(items, line, candidate, Some(line.index));
            }
            _ => debug!(line = %line.text, "sub-item without a usable price"),
        }
    }
}

impl StructuringParser for HierarchicalParser {
    fn layout(&self) -> ReceiptLayout {
        ReceiptLayout::Hierarchical
    }

    fn structure(&self, rules: &ItemRules, lines: &[ReceiptLine]) -> Vec<ParsedItem> {
        let mut items = ItemCollector::default();
        let mut state = ScanState::Scanning;

        for line in lines {
            if let ScanState::Expanding(group) = state {
                if line.indent > group.indent {
                    self.expand(rules, &group, line, &mut items);
                    continue;
                }
                trace!(line = %line.text, "group closed");
            }
            state = self.scan(rules, line, &mut items);
        }

        items.into_items()
    }
}
