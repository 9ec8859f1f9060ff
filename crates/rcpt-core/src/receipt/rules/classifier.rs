//! Line classification: administrative noise versus purchasable products.
//!
//! A line is tested against exact critical phrases and structural shapes
//! first. Food vocabulary then overrides the keyword blacklist, so
//! "GST Crackers" stays an item while "GST 0.66" does not.

use regex::Regex;
use std::collections::HashSet;
use tracing::trace;

use super::contains_word;
use super::patterns::{
    HAS_WORD, LEADING_COUNTS, MULTI_BUY, NON_ITEM_SHAPES, NUMBERED_CODE, PACKAGING, PER_UNIT,
    SUSPICIOUS_NAMES, TRAILING_AMOUNT, WEIGHT_TOKEN,
};
use crate::error::{LexiconError, Result};
use crate::models::config::ExtractionConfig;
use crate::models::lexicon::Lexicon;

/// Why a name was accepted as a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    /// Contains a food or grocery word.
    FoodVocabulary,
    /// Mentions packaging ("6 pk", "bottle").
    Packaging,
    /// Two to four words in consistent case.
    CaseStyle,
    /// A single alphabetic word of five letters or more.
    SingleWord,
}

impl Evidence {
    pub fn confidence(self) -> f32 {
        match self {
            Self::FoodVocabulary => 0.9,
            Self::Packaging => 0.75,
            Self::CaseStyle => 0.6,
            Self::SingleWord => 0.5,
        }
    }
}

/// Compiled lexicon for classifying lines and names.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    /// Matched on word boundaries.
    word_keywords: Vec<String>,
    /// Scripts written without spaces; matched anywhere.
    unspaced_keywords: Vec<String>,
    critical: HashSet<String>,
    ambiguous: HashSet<String>,
    food_words: Vec<String>,
    food_phrases: Vec<String>,
    descriptors: Vec<String>,
    unit_keywords: HashSet<String>,
    modifiers: Vec<String>,
    extra_patterns: Vec<Regex>,
    min_name_len: usize,
}

fn lowered(table: &[String]) -> impl Iterator<Item = String> + '_ {
    table
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

impl LineClassifier {
    /// Compile a lexicon. Fails when an extra non-item pattern is invalid.
    pub fn new(lexicon: &Lexicon, config: &ExtractionConfig) -> Result<Self> {
        let extra_patterns = lexicon
            .extra_non_item_patterns
            .iter()
            .map(|pattern| {
                Regex::new(&format!("(?i){pattern}")).map_err(|source| {
                    LexiconError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    }
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self::compile(lexicon, config, extra_patterns))
    }

    fn compile(lexicon: &Lexicon, config: &ExtractionConfig, extra_patterns: Vec<Regex>) -> Self {
        let ambiguous: HashSet<String> = lowered(&lexicon.ambiguous_terms).collect();

        let (unspaced_keywords, words): (Vec<String>, Vec<String>) = lowered(&lexicon.blacklist)
            .filter(|k| !ambiguous.contains(k))
            .partition(|k| k.chars().any(is_unspaced_script));
        let word_keywords = words
            .into_iter()
            .flat_map(|k| {
                let plural = (k.chars().count() > 4
                    && k.chars().all(char::is_alphabetic)
                    && !k.ends_with('s'))
                .then(|| format!("{k}s"));
                std::iter::once(k).chain(plural)
            })
            .collect();

        let (food_phrases, food_words): (Vec<String>, Vec<String>) =
            lowered(&lexicon.food_vocabulary).partition(|t| t.contains(' '));

        Self {
            word_keywords,
            unspaced_keywords,
            critical: lowered(&lexicon.critical_phrases).collect(),
            ambiguous,
            food_words,
            food_phrases,
            descriptors: lowered(&lexicon.food_descriptors).collect(),
            unit_keywords: lowered(&lexicon.unit_keywords).collect(),
            modifiers: lowered(&lexicon.modifiers).collect(),
            extra_patterns,
            min_name_len: config.min_name_len,
        }
    }

    /// Whether a line (or a cleaned name) is administrative rather than a product.
    pub fn is_non_item(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        let name_only = TRAILING_AMOUNT.replace(&lower, "").trim().to_string();
        let core = LEADING_COUNTS.replace(&name_only, "").trim().to_string();

        if [&lower, &name_only, &core].iter().any(|t| self.critical.contains(t.as_str())) {
            trace!(line = text, "critical phrase");
            return true;
        }

        if NON_ITEM_SHAPES
            .iter()
            .chain(self.extra_patterns.iter())
            .any(|p| p.is_match(&lower))
        {
            trace!(line = text, "non-item shape");
            return true;
        }

        if NUMBERED_CODE.is_match(&lower) && !HAS_WORD.is_match(&name_only) {
            return true;
        }

        if self.has_food_evidence(&name_only) {
            return false;
        }

        if self.ambiguous.contains(core.as_str()) {
            trace!(line = text, "ambiguous term as whole name");
            return true;
        }

        // "2 @ 3.99" is a multi-buy price, not a code marker
        let keyword_text = MULTI_BUY.replace_all(&lower, " ");
        if self.matches_keyword(&keyword_text) {
            trace!(line = text, "blacklisted keyword");
            return true;
        }

        core.chars().count() < self.min_name_len
    }

    /// Whether a line only describes a weight ("0.442kg NET @ $2.99/kg").
    pub fn is_weight_descriptor_only(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        let has_marker = WEIGHT_TOKEN.is_match(&lower)
            || PER_UNIT.is_match(&lower)
            || lower.contains('@')
            || contains_word(&lower, "net");
        if !has_marker {
            return false;
        }

        lower
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| w.chars().count() >= 3)
            .all(|w| self.unit_keywords.contains(w))
    }

    /// Whether a line is a customization of the item above ("ADD Cream").
    pub fn is_modifier(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        self.modifiers.iter().any(|m| {
            lower == *m
                || lower
                    .strip_prefix(m.as_str())
                    .is_some_and(|rest| rest.starts_with(char::is_whitespace))
        })
    }

    /// Why a cleaned name looks like a product, if it does.
    pub fn plausibility(&self, name: &str) -> Option<Evidence> {
        let name = name.trim();
        if name.chars().count() < self.min_name_len {
            return None;
        }
        if SUSPICIOUS_NAMES.iter().any(|p| p.is_match(name)) {
            return None;
        }
        if self.is_non_item(name) || self.is_weight_descriptor_only(name) {
            return None;
        }

        let lower = name.to_lowercase();
        if self.has_food_evidence(&lower)
            || self.descriptors.iter().any(|d| contains_word(&lower, d))
        {
            return Some(Evidence::FoodVocabulary);
        }
        if PACKAGING.is_match(name) {
            return Some(Evidence::Packaging);
        }

        let visible: Vec<char> = name.chars().filter(|c| !c.is_whitespace()).collect();
        let letters = visible.iter().filter(|c| c.is_alphabetic()).count();
        if letters < 3 || letters * 10 < visible.len() * 6 {
            return None;
        }

        let words: Vec<&str> = name.split_whitespace().collect();
        if (2..=4).contains(&words.len()) && has_consistent_case(&words) {
            return Some(Evidence::CaseStyle);
        }
        if words.len() == 1 && name.chars().all(char::is_alphabetic) && name.chars().count() >= 5 {
            return Some(Evidence::SingleWord);
        }

        None
    }

    /// Whether a cleaned name looks like a purchasable product.
    pub fn is_plausible_item(&self, name: &str) -> bool {
        self.plausibility(name).is_some()
    }

    /// Whether the lowercased text contains food or grocery vocabulary.
    fn has_food_evidence(&self, lower: &str) -> bool {
        if self.food_phrases.iter().any(|p| lower.contains(p.as_str())) {
            return true;
        }

        lower
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .any(|word| self.food_words.iter().any(|token| word_matches_token(word, token)))
    }

    fn matches_keyword(&self, lower: &str) -> bool {
        self.word_keywords.iter().any(|k| contains_word(lower, k))
            || self.unspaced_keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::compile(&Lexicon::default(), &ExtractionConfig::default(), Vec::new())
    }
}

/// Short tokens need an exact or plural match ("pea" must not hit "peach",
/// "rice" must not hit "price"). Longer tokens match inside compounds and
/// absorb OCR truncation ("chick" for "chicken").
fn word_matches_token(word: &str, token: &str) -> bool {
    let token_len = token.chars().count();
    if token_len <= 4 {
        return word == token
            || word.strip_prefix(token).is_some_and(|rest| rest == "s" || rest == "es");
    }

    let word_len = word.chars().count();
    word.contains(token)
        || (word_len >= 5 && token_len - word_len.min(token_len) <= 2 && token.starts_with(word))
}

/// Han, kana and Thai text has no spaces between words.
fn is_unspaced_script(c: char) -> bool {
    matches!(c,
        '\u{0E00}'..='\u{0E7F}'
        | '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}')
}

/// All caps, or every word starting with an uppercase letter.
fn has_consistent_case(words: &[&str]) -> bool {
    let all_caps = words
        .iter()
        .all(|w| !w.chars().any(char::is_lowercase));
    let title = words.iter().all(|w| {
        w.chars()
            .find(|c| c.is_alphabetic())
            .is_none_or(char::is_uppercase)
    });
    all_caps || title
}
