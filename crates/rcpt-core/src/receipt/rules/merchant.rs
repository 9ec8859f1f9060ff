//! Merchant name detection from the receipt header.

use super::contains_word;
use super::patterns::{HAS_PRICE, NUMERIC_LINE, TIME_OF_DAY};
use super::{DateExtractor, ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;
use crate::models::lexicon::Lexicon;

/// Picks the store name from the first few header lines.
#[derive(Debug, Clone)]
pub struct MerchantExtractor {
    scan_lines: usize,
    max_caps_len: usize,
    exclusions: Vec<String>,
    business_words: Vec<String>,
    dates: DateExtractor,
}

impl MerchantExtractor {
    pub fn new(lexicon: &Lexicon, config: &ExtractionConfig) -> Self {
        let lowered = |table: &[String]| -> Vec<String> {
            table.iter().map(|s| s.to_lowercase()).collect()
        };
        Self {
            scan_lines: config.merchant_scan_lines,
            max_caps_len: config.merchant_max_caps_len,
            exclusions: lowered(lexicon.merchant_exclusions.as_slice()),
            business_words: lowered(lexicon.business_words.as_slice()),
            dates: DateExtractor::with_pivot(config.two_digit_year_pivot),
        }
    }

    /// Header lines that could name the store, in order.
    fn candidates<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(self.scan_lines)
            .filter(|l| self.is_candidate(l))
            .collect()
    }

    fn is_candidate(&self, line: &str) -> bool {
        if line.chars().count() < 3 || NUMERIC_LINE.is_match(line) {
            return false;
        }
        if HAS_PRICE.is_match(line) || TIME_OF_DAY.is_match(line) {
            return false;
        }
        if self.dates.extract(line).is_some() {
            return false;
        }
        let lower = line.to_lowercase();
        !self.exclusions.iter().any(|w| contains_word(&lower, w))
    }

    fn looks_like_name(&self, line: &str) -> bool {
        let has_letters = line.chars().any(char::is_alphabetic);
        let all_caps = has_letters && !line.chars().any(char::is_lowercase);
        if all_caps && line.chars().count() <= self.max_caps_len {
            return true;
        }
        let lower = line.to_lowercase();
        self.business_words.iter().any(|w| contains_word(&lower, w))
    }
}

impl Default for MerchantExtractor {
    fn default() -> Self {
        Self::new(&Lexicon::default(), &ExtractionConfig::default())
    }
}

impl FieldExtractor for MerchantExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Name-like lines first, then longer lines not starting with a digit.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let candidates = self.candidates(text);

        let named = candidates
            .iter()
            .filter(|l| self.looks_like_name(l))
            .map(|l| ExtractionMatch::new(l.to_string(), 0.8, *l));
        let fallback = candidates
            .iter()
            .filter(|l| !self.looks_like_name(l))
            .filter(|l| l.chars().count() > 5 && !l.starts_with(|c: char| c.is_ascii_digit()))
            .map(|l| ExtractionMatch::new(l.to_string(), 0.5, *l));

        named.chain(fallback).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn merchant(text: &str) -> Option<String> {
        MerchantExtractor::default().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_all_caps_header() {
        let text = "LOREM SHOP\n123 ANYWHERE ST\n1: 0275 Ut wisi enim 2.99";
        assert_eq!(merchant(text).as_deref(), Some("LOREM SHOP"));
    }

    #[test]
    fn test_business_word() {
        let text = "Welcome to\nJoe's Family Restaurant\n(555) 123-4567";
        assert_eq!(merchant(text).as_deref(), Some("Joe's Family Restaurant"));
    }

    #[test]
    fn test_skips_dates_and_receipt_words() {
        let text = "RECEIPT\nDATE         06/01/2019        WED\nGreen Valley Farms";
        assert_eq!(merchant(text).as_deref(), Some("Green Valley Farms"));
    }

    #[test]
    fn test_none_when_header_is_noise() {
        let text = "485\nKS# 4 08:13:56 AM\nQTY ITEM TOTAL\n1 Buy One, Get One 3.99";
        assert_eq!(merchant(text), None);
    }

    #[test]
    fn test_only_scans_leading_lines() {
        let text = "12\n34\n56\n78\n90\nCORNER STORE";
        assert_eq!(merchant(text), None);
    }
}
