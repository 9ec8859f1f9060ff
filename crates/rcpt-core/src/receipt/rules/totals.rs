//! Subtotal, tax and total extraction.

use rust_decimal::Decimal;
use tracing::debug;

use super::amounts::AmountExtractor;
use super::patterns::{
    SUBTOTAL_KEYWORD, TAX_ID_GUARD, TAX_KEYWORD, TOTAL_GUARD, TOTAL_KEYWORD, TOTAL_TAX,
};
use super::FieldExtractor;

/// Receipt-level amounts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiptTotals {
    pub subtotal: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub total: Option<Decimal>,
}

/// Words allowed around a tax keyword on a tax line ("Sales Tax 8.25%").
const TAX_LABEL_WORDS: &[&str] = &[
    "tax", "taxes", "gst", "hst", "pst", "qst", "vat", "iva", "tva", "mwst", "btw",
    "total", "sales", "local", "state", "city", "county", "service", "incl", "inc",
    "included", "amount", "rate",
];

/// Scan keyword lines for totals, taking the last amount on each line.
///
/// The largest total and subtotal win (running totals before discounts
/// are smaller). A total that mentions tax ("TOTAL INCL GST") is still a
/// total. Tax lines are summed. A missing subtotal is derived
/// from `total - tax` when both are known.
pub fn extract_totals<'a, I>(amounts: &AmountExtractor, lines: I) -> ReceiptTotals
where
    I: IntoIterator<Item = &'a str>,
{
    let mut totals = ReceiptTotals::default();

    for line in lines {
        let Some(amount) = amounts.extract_all(line).pop().map(|m| m.value) else {
            continue;
        };

        let is_total = TOTAL_KEYWORD.is_match(line)
            && !TOTAL_GUARD.is_match(line)
            && !TOTAL_TAX.is_match(line);
        let is_tax = !is_total
            && TAX_KEYWORD.is_match(line)
            && !TAX_ID_GUARD.is_match(line)
            && is_tax_label(line);

        if is_tax {
            totals.tax = Some(totals.tax.unwrap_or(Decimal::ZERO) + amount);
        }
        if SUBTOTAL_KEYWORD.is_match(line) {
            totals.subtotal = Some(totals.subtotal.map_or(amount, |s| s.max(amount)));
        } else if is_total {
            totals.total = Some(totals.total.map_or(amount, |t| t.max(amount)));
        }
    }

    if totals.subtotal.is_none() {
        if let (Some(total), Some(tax)) = (totals.total, totals.tax) {
            debug!(%total, %tax, "subtotal derived from total and tax");
            totals.subtotal = Some(total - tax);
        }
    }

    totals
}

/// Tax lines carry no product words ("GST Crackers 3.99" is an item).
fn is_tax_label(line: &str) -> bool {
    line.to_lowercase()
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .all(|w| TAX_LABEL_WORDS.contains(&w))
}
