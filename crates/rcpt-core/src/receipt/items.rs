//! Shared item-building rules and the de-duplicating item collector.

use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::debug;

use super::lines::ReceiptLine;
use super::rules::{
    extract_weight, split_line_fields, AmountExtractor, LineClassifier, LineFields, NameCleaner,
};
use crate::error::Result;
use crate::models::config::ParserConfig;
use crate::models::receipt::ParsedItem;

/// A name/price pair waiting for the plausibility check.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub quantity: Decimal,
    pub price: Decimal,
    /// Weight in kilograms printed on the same line.
    pub weight: Option<Decimal>,
}

impl Candidate {
    pub fn new(name: String, quantity: Decimal, price: Decimal) -> Self {
        Self {
            name,
            quantity,
            price,
            weight: None,
        }
    }
}

/// Classifier, cleaner and amount extractor shared by both layouts.
#[derive(Debug, Clone)]
pub struct ItemRules {
    pub classifier: LineClassifier,
    pub cleaner: NameCleaner,
    pub amounts: AmountExtractor,
    pub merge_weight_lines: bool,
}

impl ItemRules {
    pub fn new(config: &ParserConfig) -> Result<Self> {
        Ok(Self {
            classifier: LineClassifier::new(&config.lexicon, &config.extraction)?,
            cleaner: NameCleaner::new(&config.extraction),
            amounts: AmountExtractor::from_settings(&config.lexicon, &config.extraction)?,
            merge_weight_lines: config.extraction.merge_weight_lines,
        })
    }

    pub fn fields(&self, text: &str) -> LineFields {
        split_line_fields(&self.amounts, text)
    }

    /// Build a candidate from a priced line, with the name cleaned.
    pub fn candidate(&self, text: &str) -> Option<Candidate> {
        let fields = self.fields(text);
        let price = fields.price?;
        Some(Candidate {
            name: self.cleaner.clean(&fields.remainder),
            quantity: fields.quantity,
            price,
            weight: fields.weight.as_ref().map(|w| w.kilograms()),
        })
    }

    /// Consume a weight-only line, folding its weight into the item
    /// printed directly above. Returns false for any other line.
    pub fn absorb_weight_line(&self, line: &ReceiptLine, collector: &mut ItemCollector) -> bool {
        if !self.classifier.is_weight_descriptor_only(&line.text) {
            return false;
        }
        if self.merge_weight_lines {
            if let Some(weight) = extract_weight(&line.text) {
                if collector.attach_weight(line.index, weight.kilograms()) {
                    debug!(line = %line.text, "weight merged into previous item");
                }
            }
        }
        true
    }

    /// Add a candidate when its name is plausible and it is not a duplicate.
    ///
    /// `tiebreak` keeps identical sub-items under one header apart.
    pub fn accept(
        &self,
        collector: &mut ItemCollector,
        line: &ReceiptLine,
        candidate: Candidate,
        tiebreak: Option<usize>,
    ) -> bool {
        if candidate.price <= Decimal::ZERO {
            debug!(line = %line.text, "non-positive price");
            return false;
        }
        let Some(evidence) = self.classifier.plausibility(&candidate.name) else {
            debug!(name = %candidate.name, line = %line.text, "implausible item name");
            return false;
        };

        let mut item = ParsedItem::new(
            candidate.name,
            candidate.quantity,
            candidate.price,
            line.text.clone(),
            line.index,
        )
        .with_confidence(evidence.confidence());
        if let Some(kilograms) = candidate.weight {
            item.apply_weight(kilograms);
        }

        collector.push(item, tiebreak)
    }
}

impl Default for ItemRules {
    fn default() -> Self {
        Self {
            classifier: LineClassifier::default(),
            cleaner: NameCleaner::default(),
            amounts: AmountExtractor::default(),
            merge_weight_lines: true,
        }
    }
}

/// Accepted items in order, without duplicates.
#[derive(Debug, Default)]
pub struct ItemCollector {
    items: Vec<ParsedItem>,
    seen: HashSet<(String, Decimal, Option<usize>)>,
}

impl ItemCollector {
    /// Returns false when an item with the same key was already accepted.
    pub fn push(&mut self, item: ParsedItem, tiebreak: Option<usize>) -> bool {
        let key = (item.name.to_lowercase(), item.price.normalize(), tiebreak);
        if !self.seen.insert(key) {
            debug!(name = %item.name, price = %item.price, "duplicate item");
            return false;
        }
        debug!(name = %item.name, price = %item.price, quantity = %item.quantity, "item accepted");
        self.items.push(item);
        true
    }

    /// Apply a weight to the last item when it sits on the line just above.
    pub fn attach_weight(&mut self, line_index: usize, kilograms: Decimal) -> bool {
        match self.items.last_mut() {
            Some(item) if item.line_index + 1 == line_index && !item.is_weighed() => {
                item.apply_weight(kilograms);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<ParsedItem> {
        self.items
    }
}
