//! Amount extraction for receipts in mixed number formats.
//!
//! Receipts print `1,234.56`, `1.234,56`, `1 234,56` or a bare `1234`
//! depending on locale and OCR quality. The extractor tries formats from
//! most to least specific and resolves the decimal separator per token.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::patterns::{
    AMOUNT_TOKEN, END_AMOUNT, NUMBER_EU, NUMBER_INTEGER, NUMBER_ONE_DECIMAL, NUMBER_SIMPLE,
    NUMBER_SPACED, NUMBER_US,
};
use super::{ExtractionMatch, FieldExtractor};
use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::lexicon::Lexicon;

lazy_static! {
    static ref DEFAULT_EXTRACTOR: AmountExtractor =
        AmountExtractor::from_settings(&Lexicon::default(), &ExtractionConfig::default())
            .expect("built-in currency tables compile");
}

/// Price and total extractor.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    currency: Regex,
    currency_before: Regex,
    currency_after: Regex,
    min_amount: Decimal,
    max_amount: Decimal,
}

impl AmountExtractor {
    /// Extractor with the built-in currency table and default range.
    pub fn new() -> Self {
        DEFAULT_EXTRACTOR.clone()
    }

    /// Build an extractor from a lexicon's currency tables and an amount range.
    pub fn from_settings(lexicon: &Lexicon, config: &ExtractionConfig) -> Result<Self> {
        let alternation = currency_alternation(lexicon);
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|source| crate::error::LexiconError::InvalidPattern {
                pattern,
                source,
            })
        };

        Ok(Self {
            currency: compile(format!(r"(?i)(?:{alternation})"))?,
            currency_before: compile(format!(
                r"(?i)(?:{alternation})\s*(\d{{1,3}}(?: \d{{3}})+[.,]\d{{2}}\b|\d(?:[\d.,]*\d)?)"
            ))?,
            currency_after: compile(format!(
                r"(?i)(\d(?:[\d.,]*\d)?)\s*(?:{alternation})"
            ))?,
            min_amount: config.min_amount,
            max_amount: config.max_amount,
        })
    }

    /// Normalize a text fragment to a decimal amount.
    ///
    /// Currency markers are ignored. Each format must match a whole amount
    /// token, so `999999.99` is never read as `999999`. Values outside the
    /// configured range are treated as codes and rejected.
    pub fn normalize(&self, fragment: &str) -> Option<Decimal> {
        let cleaned = self.currency.replace_all(fragment, " ");
        let tokens = amount_tokens(&cleaned);
        let is_whole = |start: usize, end: usize| tokens.contains(&(start, end));

        let levels: [&Regex; 6] = [
            &NUMBER_US,
            &NUMBER_EU,
            &NUMBER_SPACED,
            &NUMBER_SIMPLE,
            &NUMBER_ONE_DECIMAL,
            &NUMBER_INTEGER,
        ];

        for pattern in levels {
            let Some(found) = pattern
                .find_iter(&cleaned)
                .find(|m| is_whole(m.start(), m.end()))
            else {
                continue;
            };
            if let Some(value) = self.accept(found.as_str()) {
                return Some(value);
            }
        }

        // Irregular grouping ("12,5", "1.234"): let the separator rules decide.
        tokens
            .iter()
            .find_map(|&(start, end)| self.accept(&cleaned[start..end]))
    }

    /// Locate the price of a single receipt line.
    ///
    /// The last currency-marked amount wins; otherwise the token at the end
    /// of the line. Bare integers need two digits or a currency marker.
    pub fn locate_price(&self, line: &str) -> Option<ExtractionMatch<Decimal>> {
        let marked = self
            .currency_before
            .captures_iter(line)
            .chain(self.currency_after.captures_iter(line))
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let value = self.normalize(caps.get(1)?.as_str())?;
                Some((whole.start(), whole.end(), value))
            })
            .max_by_key(|(start, _, _)| *start);

        if let Some((start, end, value)) = marked {
            return Some(
                ExtractionMatch::new(value, 0.9, &line[start..end]).with_position(start, end),
            );
        }

        let caps = END_AMOUNT.captures(line)?;
        let token = caps.get(1)?;
        let is_bare_integer = !token.as_str().contains(['.', ',']);
        if is_bare_integer && token.as_str().len() < 2 {
            return None;
        }
        let value = self.normalize(token.as_str())?;
        let confidence = if is_bare_integer { 0.5 } else { 0.8 };
        Some(
            ExtractionMatch::new(value, confidence, token.as_str())
                .with_position(token.start(), token.end()),
        )
    }

    fn accept(&self, token: &str) -> Option<Decimal> {
        let value = parse_number(token)?;
        if value >= self.min_amount && value <= self.max_amount {
            Some(value)
        } else {
            trace!(token, %value, "amount out of range");
            None
        }
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.locate_price(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_TOKEN
            .find_iter(text)
            .filter_map(|m| {
                let value = self.normalize(m.as_str())?;
                Some(ExtractionMatch::new(value, 0.7, m.as_str()).with_position(m.start(), m.end()))
            })
            .collect()
    }
}

/// Normalize a fragment with the built-in currency table and default range.
pub fn normalize_amount(fragment: &str) -> Option<Decimal> {
    DEFAULT_EXTRACTOR.normalize(fragment)
}

/// Parse a single number token, deciding which separator is decimal.
///
/// With both `,` and `.` present the rightmost is the decimal separator.
/// A lone `,` is decimal only when exactly two digits follow it.
pub fn parse_number(token: &str) -> Option<Decimal> {
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(c), None) => {
            if cleaned.len() - c - 1 == 2 && cleaned.matches(',').count() == 1 {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        (None, Some(_)) if cleaned.matches('.').count() > 1 => cleaned.replace('.', ""),
        _ => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

/// Spans of whole amount tokens, with space-grouped numbers kept as one.
fn amount_tokens(text: &str) -> Vec<(usize, usize)> {
    let spaced: Vec<(usize, usize)> = NUMBER_SPACED
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut tokens: Vec<(usize, usize)> = AMOUNT_TOKEN
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .filter(|&(start, end)| !spaced.iter().any(|&(s, e)| s <= start && end <= e))
        .chain(spaced.iter().copied())
        .collect();
    tokens.sort_unstable();
    tokens
}

fn currency_alternation(lexicon: &Lexicon) -> String {
    let symbols = lexicon
        .currency_symbols
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| regex::escape(s));
    let codes = lexicon
        .currency_codes
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| format!(r"\b{}\b", regex::escape(c)));

    symbols.chain(codes).collect::<Vec<_>>().join("|")
}
