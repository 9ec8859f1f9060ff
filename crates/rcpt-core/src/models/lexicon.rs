//! Versioned keyword tables driving line classification.
//!
//! The tables are plain data: the classifier compiles them once at
//! construction and shares them read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};

/// Current table layout version.
pub const LEXICON_VERSION: u32 = 3;

/// Administrative and noise keywords in several locales.
///
/// Keywords match whole words (longer ones also in plural). Han, kana and
/// Thai keywords match anywhere in the line.
const BLACKLIST: &[&str] = &[
    // English
    "subtotal", "sub-total", "sub total", "total", "change", "cash", "credit",
    "debit", "card", "payment", "amount", "balance", "due", "paid", "tender",
    "loyalty", "points", "rewards", "member", "savings", "coupon", "receipt",
    "invoice", "order", "transaction", "ref", "reference", "cashier", "server",
    "visa", "mastercard", "amex", "tip", "qty", "items", "survey", "feedback",
    // Spanish
    "cambio", "efectivo", "tarjeta", "pago", "importe", "descuento", "recibo",
    "factura", "pedido", "transacción",
    // French
    "sous-total", "monnaie", "espèces", "carte", "paiement", "montant", "remise",
    "reçu", "facture", "commande",
    // German
    "zwischensumme", "summe", "gesamt", "wechselgeld", "bargeld", "karte",
    "zahlung", "betrag", "rabatt", "beleg", "rechnung",
    // Portuguese
    "troco", "dinheiro", "cartão", "pagamento", "desconto", "fatura",
    // Italian
    "subtotale", "resto", "contanti", "sconto", "ricevuta", "fattura", "ordine",
    // Chinese
    "小计", "总计", "合计", "找零", "现金", "刷卡", "支付", "折扣", "收据",
    // Japanese
    "小計", "合計", "お釣り", "現金", "カード", "支払い", "割引", "レシート",
    // Taxes and fees
    "tax", "gst", "pst", "hst", "vat", "iva", "mwst", "tva", "btw", "imposto",
    "steuer", "duty", "fee", "surcharge",
    // Store metadata
    "store", "shop", "market", "tienda", "magasin", "geschäft", "loja",
    "date", "time", "fecha", "hora", "datum", "zeit",
    // Codes
    "number", "no", "#", "id", "code", "sku", "barcode", "ea", "@",
    // Greetings
    "thank", "welcome", "hello", "goodbye", "please", "visit", "again",
    "see you", "have a",
];

/// Phrases that exclude a line when they are its entire name.
const CRITICAL_PHRASES: &[&str] = &[
    "subtotal", "sub-total", "sub total", "total", "grand total", "final total",
    "m subtotal", "l subtotal", "s subtotal", "take-out total", "take out total",
    "takeout total", "dine-in total", "change", "cash tendered", "cash received",
    "credit card", "debit card", "balance", "balance due", "amount due",
    "amount paid", "payment", "cash", "credit", "debit", "visa", "mastercard",
    "amex", "discover", "loyalty", "loyalty points", "points", "rewards",
    "member savings", "loyalty discount", "member discount", "club discount",
    "tax", "gst", "pst", "hst", "vat", "sales tax", "local tax", "tip",
    "service charge", "delivery fee", "processing fee", "thank you",
    "have a nice day", "come again", "welcome", "store hours", "phone number",
    "address", "website", "cashier", "discount", "coupon", "savings",
    "promotion", "offer", "deal", "buy one get one", "bogo", "b1g1",
    "special offer", "combo deal", "survey", "feedback", "qty", "quantity",
    "item count", "items", "take out", "take-out", "takeout", "dine in",
    "dine-in", "for here", "to go", "delivery", "pickup", "drive thru",
    "drive-thru", "line item", "line total", "item total",
];

/// Excluded only when they make up the whole name ("Chicken Special" survives).
const AMBIGUOUS_TERMS: &[&str] = &["special", "discount", "promo", "sale", "offer"];

/// Food and grocery vocabulary. Entries with a space match as phrases.
const FOOD_VOCABULARY: &[&str] = &[
    // Vegetables
    "lettuce", "tomato", "potato", "onion", "carrot", "broccoli", "spinach",
    "pepper", "cucumber", "zucchini", "zuchinni", "squash", "celery", "cabbage",
    "pea", "bean", "corn", "mushroom", "asparagus", "brussel", "sprout",
    "garlic", "ginger", "parsley", "cilantro", "avocado",
    // Fruits
    "apple", "banana", "orange", "grape", "strawberry", "blueberry", "berry",
    "melon", "mango", "pineapple", "peach", "pear", "cherry", "kiwi", "lemon",
    "lime", "plum", "watermelon", "cantaloupe",
    // Proteins
    "chicken", "beef", "pork", "fish", "salmon", "tuna", "shrimp", "turkey",
    "lamb", "bacon", "sausage", "ham", "egg", "tofu", "meat", "steak", "burger",
    "wing", "thigh", "breast",
    // Prepared food
    "pizza", "burrito", "taco", "sandwich", "wrap", "nugget", "fries", "fry",
    "hot dog", "hotdog", "quesadilla", "enchilada", "nachos", "salad", "soup",
    "chili", "hash brown", "muffin", "noodle", "pasta",
    // Dairy
    "milk", "cheese", "yogurt", "yoghurt", "butter", "cream",
    // Grains and bakery
    "bread", "rice", "cereal", "flour", "oat", "quinoa", "bagel", "croissant",
    "roll", "bun", "toast", "cracker", "cookie", "cake",
    // Beverages
    "juice", "soda", "water", "coffee", "tea", "beer", "wine", "cola", "pepsi",
    "coke", "sprite", "smoothie", "lemonade", "latte", "espresso",
    // Pantry
    "oil", "sugar", "salt", "sauce", "nut", "seed", "spice", "herb", "vanilla",
    "chocolate", "honey", "jam", "jelly", "vinegar", "snack", "chip", "candy",
];

/// Descriptive words and brands that suggest groceries.
const FOOD_DESCRIPTORS: &[&str] = &[
    "fresh", "frozen", "organic", "canned", "dried", "smoked", "grilled",
    "baked", "roasted", "steamed", "sliced", "diced", "chopped", "ground",
    "minced", "shredded", "natural", "iced", "spicy", "kraft", "heinz",
    "campbell", "nestle", "kellogg", "pillsbury",
];

/// Words that appear in weight/unit annotations and never in names.
const UNIT_KEYWORDS: &[&str] = &[
    "kg", "kq", "g", "lb", "lbs", "oz", "l", "ml", "net", "wt", "weight",
    "each", "ea", "per", "pk",
];

/// Leading tokens marking a customization line.
const MODIFIERS: &[&str] = &["add", "no", "extra", "hold", "without", "with", "side"];

/// Words that disqualify a header line as the merchant name.
const MERCHANT_EXCLUSIONS: &[&str] = &[
    "invoice", "receipt", "bill", "phone", "tel", "fax", "address", "www",
    "http", "qty", "total", "subtotal", "cashier", "server", "order", "table",
];

/// Words that mark a line as a business name.
const BUSINESS_WORDS: &[&str] = &[
    "restaurant", "market", "supermarket", "shop", "store", "cafe", "café",
    "foods", "grocery", "bakery", "deli", "grill", "kitchen", "mart", "diner",
    "pizzeria",
];

const CURRENCY_SYMBOLS: &[&str] = &[
    "$", "€", "£", "¥", "₹", "₽", "₩", "¢", "₡", "₦", "₨", "₱", "₫", "₪", "₴",
    "₸", "₼", "₾", "₺",
];

const CURRENCY_CODES: &[&str] = &[
    "kr", "zł", "Kč", "Ft", "lei", "lv", "Lt", "USD", "EUR", "GBP", "JPY",
    "CNY", "INR", "RUB", "KRW", "AUD", "CAD", "PLN", "CHF", "NZD",
];

fn owned(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| s.to_string()).collect()
}

/// Keyword tables used by the classifier, cleaner and extractors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Table layout version.
    pub version: u32,

    /// Administrative/noise keywords.
    pub blacklist: Vec<String>,

    /// Whole-name non-item phrases.
    pub critical_phrases: Vec<String>,

    /// Keywords excluded only as the entire name.
    pub ambiguous_terms: Vec<String>,

    /// Food and grocery tokens; evidence here overrides blacklist keywords.
    pub food_vocabulary: Vec<String>,

    /// Descriptors and brands counted as product evidence.
    pub food_descriptors: Vec<String>,

    /// Unit annotation words.
    pub unit_keywords: Vec<String>,

    /// Customization line prefixes.
    pub modifiers: Vec<String>,

    /// Words that rule a line out as merchant name.
    pub merchant_exclusions: Vec<String>,

    /// Words that mark a merchant line.
    pub business_words: Vec<String>,

    /// Currency symbols, matched anywhere.
    pub currency_symbols: Vec<String>,

    /// Alphabetic currency codes, matched as whole words.
    pub currency_codes: Vec<String>,

    /// Additional regular expressions describing non-item lines.
    pub extra_non_item_patterns: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            version: LEXICON_VERSION,
            blacklist: owned(BLACKLIST),
            critical_phrases: owned(CRITICAL_PHRASES),
            ambiguous_terms: owned(AMBIGUOUS_TERMS),
            food_vocabulary: owned(FOOD_VOCABULARY),
            food_descriptors: owned(FOOD_DESCRIPTORS),
            unit_keywords: owned(UNIT_KEYWORDS),
            modifiers: owned(MODIFIERS),
            merchant_exclusions: owned(MERCHANT_EXCLUSIONS),
            business_words: owned(BUSINESS_WORDS),
            currency_symbols: owned(CURRENCY_SYMBOLS),
            currency_codes: owned(CURRENCY_CODES),
            extra_non_item_patterns: Vec::new(),
        }
    }
}

impl Lexicon {
    /// Parse and validate a lexicon from JSON. Missing tables fall back to
    /// the built-in ones.
    pub fn from_json(json: &str) -> Result<Self> {
        let lexicon: Self = serde_json::from_str(json)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Check the tables before they are compiled.
    pub fn validate(&self) -> std::result::Result<(), LexiconError> {
        if self.version > LEXICON_VERSION {
            return Err(LexiconError::UnsupportedVersion {
                found: self.version,
                supported: LEXICON_VERSION,
            });
        }
        if self.food_vocabulary.is_empty() {
            return Err(LexiconError::EmptyTable("food_vocabulary"));
        }
        if self.blacklist.is_empty() && self.critical_phrases.is_empty() {
            return Err(LexiconError::EmptyTable("blacklist"));
        }
        if self.currency_symbols.is_empty() && self.currency_codes.is_empty() {
            return Err(LexiconError::EmptyTable("currency_symbols"));
        }
        Ok(())
    }

    /// Extend the food vocabulary, e.g. with a store's house brands.
    pub fn with_food_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.food_vocabulary.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Add a regular expression matching extra non-item lines.
    pub fn with_non_item_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_non_item_patterns.push(pattern.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_keeps_builtin_tables() {
        let lexicon = Lexicon::from_json(r#"{"food_vocabulary": ["poutine"]}"#).unwrap();
        assert_eq!(lexicon.food_vocabulary, vec!["poutine".to_string()]);
        assert!(!lexicon.blacklist.is_empty());
        assert!(Lexicon::from_json(r#"{"version": 99}"#).is_err());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(Lexicon::default().validate().is_ok());
    }

    #[test]
    fn test_ambiguous_terms_are_not_blacklisted() {
        let lexicon = Lexicon::default();
        for term in &lexicon.ambiguous_terms {
            assert!(!lexicon.blacklist.contains(term), "{term} is in the blacklist");
        }
    }

    #[test]
    fn test_rejects_newer_version() {
        let lexicon = Lexicon {
            version: LEXICON_VERSION + 1,
            ..Default::default()
        };
        assert!(matches!(
            lexicon.validate(),
            Err(LexiconError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_food_vocabulary() {
        let lexicon = Lexicon {
            food_vocabulary: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            lexicon.validate(),
            Err(LexiconError::EmptyTable("food_vocabulary"))
        ));
    }

    #[test]
    fn test_builders_extend_tables() {
        let lexicon = Lexicon::default()
            .with_food_terms(["kimchi"])
            .with_non_item_pattern(r"^\s*table\s+\d+");
        assert!(lexicon.food_vocabulary.iter().any(|t| t == "kimchi"));
        assert_eq!(lexicon.extra_non_item_patterns.len(), 1);
    }
}
