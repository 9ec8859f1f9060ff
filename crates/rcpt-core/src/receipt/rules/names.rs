//! Item name cleanup: strips codes, promotions, measurement tails and
//! leaked modifier text, then normalizes case.

use regex::Regex;

use super::patterns::{
    CODE_PASS, EDGE_NOISE, LEAKED_PHRASE_PASS, MEASUREMENT_PASS, PROMO_PASS, PUNCTUATION_PASS,
    SUB_ITEM_COUNT, WHITESPACE_RUN,
};
use crate::models::config::ExtractionConfig;

/// Turns raw line residue into a display name.
#[derive(Debug, Clone)]
pub struct NameCleaner {
    min_name_len: usize,
}

impl NameCleaner {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            min_name_len: config.min_name_len,
        }
    }

    /// Clean a raw name. Returns an empty string when too little survives.
    ///
    /// Cleaning an already clean name returns it unchanged.
    pub fn clean(&self, raw: &str) -> String {
        let passes: [&[(Regex, &'static str)]; 5] = [
            &PROMO_PASS,
            &CODE_PASS,
            &MEASUREMENT_PASS,
            &PUNCTUATION_PASS,
            &LEAKED_PHRASE_PASS,
        ];

        let mut name = raw.trim().to_string();
        for pass in passes {
            for (pattern, replacement) in pass {
                name = pattern.replace_all(&name, *replacement).trim().to_string();
            }
        }

        let name = EDGE_NOISE.replace_all(&name, "");
        let name = WHITESPACE_RUN.replace_all(&name, " ");
        if name.chars().count() < self.min_name_len {
            return String::new();
        }

        title_case(&name)
    }

    /// Clean an indented sub-item line, which often starts with a count.
    pub fn clean_sub_item(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        self.clean(&SUB_ITEM_COUNT.replace(trimmed, ""))
    }
}

impl Default for NameCleaner {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

/// Title-case words printed all upper or all lower; mixed case is kept.
fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let has_upper = word.chars().any(char::is_uppercase);
            let has_lower = word.chars().any(char::is_lowercase);
            if has_upper && has_lower {
                return word.to_string();
            }

            let mut out = String::with_capacity(word.len());
            let mut at_run_start = true;
            for c in word.chars() {
                if c.is_alphabetic() {
                    if at_run_start {
                        out.extend(c.to_uppercase());
                    } else {
                        out.extend(c.to_lowercase());
                    }
                    at_run_start = false;
                } else {
                    out.push(c);
                    at_run_start = true;
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_numbered_codes() {
        let cleaner = NameCleaner::default();
        assert_eq!(cleaner.clean("5: 1095 Aeuismod"), "Aeuismod");
        assert_eq!(cleaner.clean("1: 0275 Ut wisi enim"), "Ut Wisi Enim");
        assert_eq!(cleaner.clean("0942 Rdol magna"), "Rdol Magna");
    }

    #[test]
    fn test_strips_leading_counts() {
        let cleaner = NameCleaner::default();
        assert_eq!(cleaner.clean("2 Burritos EVM"), "Burritos Evm");
        assert_eq!(cleaner.clean("2 Hash Browns"), "Hash Browns");
        assert_eq!(cleaner.clean("3 x Bagels"), "Bagels");
    }

    #[test]
    fn test_preserves_mixed_case() {
        let cleaner = NameCleaner::default();
        assert_eq!(cleaner.clean("Sausage Egg McMuffin"), "Sausage Egg McMuffin");
        assert_eq!(cleaner.clean("BANANA CAVENDISH"), "Banana Cavendish");
        assert_eq!(cleaner.clean("take-out fries"), "Fries");
    }

    #[test]
    fn test_promotions_clean_to_empty() {
        let cleaner = NameCleaner::default();
        assert_eq!(cleaner.clean("1 Buy One, Get One"), "");
        assert_eq!(cleaner.clean("BOGO Sandwich"), "");
        assert_eq!(cleaner.clean("Combo Deal: Burger"), "Burger");
    }

    #[test]
    fn test_strips_measurements_and_modifiers() {
        let cleaner = NameCleaner::default();
        assert_eq!(cleaner.clean("Bananas 0.442kg NET"), "Bananas");
        assert_eq!(cleaner.clean("Apples @ 1.99"), "Apples");
        assert_eq!(cleaner.clean("Iced Coffee no sugar"), "Iced Coffee");
        assert_eq!(cleaner.clean("Tacos line 4"), "Tacos");
    }

    #[test]
    fn test_punctuation() {
        let cleaner = NameCleaner::default();
        assert_eq!(cleaner.clean("Soup,,, of the day..."), "Soup Of The Day");
        assert_eq!(cleaner.clean("-- Nachos --"), "Nachos");
        assert_eq!(cleaner.clean("A."), "");
    }

    #[test]
    fn test_clean_sub_item() {
        let cleaner = NameCleaner::default();
        assert_eq!(cleaner.clean_sub_item("    1 Sausage Egg McMuffin"), "Sausage Egg McMuffin");
        assert_eq!(cleaner.clean_sub_item("1 S Coffee"), "S Coffee");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let cleaner = NameCleaner::default();
        for raw in ["1 2 Burritos EVM", "5: 1095 Aeuismod", "PEAS SNOW", "Pizza Makhaani - Full"] {
            let once = cleaner.clean(raw);
            assert_eq!(cleaner.clean(&once), once);
        }
    }
}
