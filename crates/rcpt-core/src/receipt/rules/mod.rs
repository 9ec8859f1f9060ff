//! Rule-based classifiers and field extractors for receipt lines.

pub mod amounts;
pub mod classifier;
pub mod dates;
pub mod merchant;
pub mod names;
pub mod patterns;
pub mod quantities;
pub mod totals;

pub use amounts::{normalize_amount, AmountExtractor};
pub use classifier::{Evidence, LineClassifier};
pub use dates::DateExtractor;
pub use merchant::MerchantExtractor;
pub use names::NameCleaner;
pub use quantities::{compute_unit_price, extract_weight, split_line_fields, LineFields, Weight, WeightUnit};
pub use totals::{extract_totals, ReceiptTotals};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extracted value with confidence and location.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Byte span in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Whether `word` occurs in `haystack` without touching letters or digits
/// on its alphanumeric ends. Both sides are expected lowercase.
pub(crate) fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let starts_alnum = word.chars().next().is_some_and(char::is_alphanumeric);
    let ends_alnum = word.chars().next_back().is_some_and(char::is_alphanumeric);

    haystack.match_indices(word).any(|(start, matched)| {
        let before_ok = !starts_alnum
            || haystack[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = !ends_alnum
            || haystack[start + matched.len()..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_word() {
        assert!(contains_word("no liquid sugar", "no"));
        assert!(!contains_word("mnonuy nibh", "no"));
        assert!(contains_word("tax 0.66", "tax"));
        assert!(!contains_word("taxi ride", "tax"));
        assert!(contains_word("ks# 4", "#"));
        assert!(!contains_word("kid's meal", "id"));
    }

    #[test]
    fn test_extraction_match_position() {
        let m = ExtractionMatch::new(1, 0.5, "x").with_position(2, 3);
        assert_eq!(m.position, Some((2, 3)));
    }
}
