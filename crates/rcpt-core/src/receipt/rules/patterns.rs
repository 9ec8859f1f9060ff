//! Common regex patterns for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Line shape
    pub static ref HAS_PRICE: Regex = Regex::new(
        r"\d[.,]\d{2}\b"
    ).unwrap();

    pub static ref HAS_DIGIT: Regex = Regex::new(r"\d").unwrap();

    pub static ref TABULAR_SPLIT: Regex = Regex::new(r"\t+|\s{2,}").unwrap();

    // Number formats, tried in this order
    pub static ref NUMBER_US: Regex = Regex::new(
        r"\b\d{1,3}(?:,\d{3})*\.\d{2}\b"
    ).unwrap();

    pub static ref NUMBER_EU: Regex = Regex::new(
        r"\b\d{1,3}(?:\.\d{3})*,\d{2}\b"
    ).unwrap();

    pub static ref NUMBER_SPACED: Regex = Regex::new(
        r"\b\d{1,3}(?: \d{3})+[.,]\d{2}\b"
    ).unwrap();

    pub static ref NUMBER_SIMPLE: Regex = Regex::new(
        r"\b\d+[.,]\d{2}\b"
    ).unwrap();

    pub static ref NUMBER_ONE_DECIMAL: Regex = Regex::new(
        r"\b\d{1,3}(?:,\d{3})+\.\d\b|\b\d+\.\d\b"
    ).unwrap();

    pub static ref NUMBER_INTEGER: Regex = Regex::new(
        r"\b\d{1,3}(?:,\d{3})+\b|\b\d+\b"
    ).unwrap();

    // Price tokens
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"\d(?:[\d.,]*\d)?"
    ).unwrap();

    pub static ref END_AMOUNT: Regex = Regex::new(
        r"(?:^|\s)(\d(?:[\d.,]*\d)?)\s*$"
    ).unwrap();

    // Quantities and weights
    pub static ref LEADING_QUANTITY: Regex = Regex::new(
        r"^(\d{1,2})\s*[xX]?\s+"
    ).unwrap();

    pub static ref WEIGHT_TOKEN: Regex = Regex::new(
        r"(?i)(?:^|\s)(\d+(?:[.,]\d+)?)\s*(kg|kq|g|lbs?|oz)\b"
    ).unwrap();

    pub static ref PER_UNIT: Regex = Regex::new(
        r"(?i)/\s*(?:kg|kq|lb|oz|g)\b"
    ).unwrap();

    // Classifier helpers
    pub static ref TRAILING_AMOUNT: Regex = Regex::new(
        r"\s*-?\s*[$€£¥₹]?\s*\d[\d.,]*\s*(?:€|zł|kr)?\s*$"
    ).unwrap();

    pub static ref LEADING_COUNTS: Regex = Regex::new(
        r"^(?:\d+\s*[.:)xX]?\s*)+"
    ).unwrap();

    pub static ref MULTI_BUY: Regex = Regex::new(
        r"\b\d+\s*@\s*[$€£]?\s*\d+[.,]\d{2}\b"
    ).unwrap();

    pub static ref NUMBERED_CODE: Regex = Regex::new(
        r"^\s*\d{1,2}:\s*\d{3,6}"
    ).unwrap();

    pub static ref HAS_WORD: Regex = Regex::new(r"\p{L}{3,}").unwrap();

    pub static ref PACKAGING: Regex = Regex::new(
        r"(?i)\b(?:\d+\s*(?:pk|pack|ct|count)|pack\s+of\s+\d+|bottle|can|jar|box|bag|carton|case|dozen|loaf|bunch)\b"
    ).unwrap();

    // Non-item line shapes, matched against the lowercased line
    pub static ref NON_ITEM_SHAPES: Vec<Regex> = vec![
        // totals and tenders with their amount
        Regex::new(r"^\s*(?:sub\s*-?\s*)?total\s*[:=]?\s*[-$€£]?\s*[\d.,]+\s*$").unwrap(),
        Regex::new(r"^\s*(?:change|balance|cash|credit|debit|tax|gst|hst|pst|vat)(?:\s+due)?\s*[:=]?\s*[-$€£]?\s*[\d.,]+\s*$").unwrap(),
        Regex::new(r"^\s*take[\s-]?out\s+total\b").unwrap(),
        // promotions
        Regex::new(r"\bbuy\s+(?:one|two|\d+)[,;\s]*(?:get|receive)\s+(?:one|two|\d+)\b").unwrap(),
        Regex::new(r"\b(?:bogo|b1g1)\b").unwrap(),
        Regex::new(r"^\s*\d+\.\s*buy\s+one\b").unwrap(),
        // bare numbers and code/price pairs
        Regex::new(r"^\s*#?\d+\s*$").unwrap(),
        Regex::new(r"^\s*\d{3,6}\s*[:,-]?\s*[-$€£]?\s*\d+[.,]\d{2}\s*$").unwrap(),
        // dates and times
        Regex::new(r"^\s*\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\s*$").unwrap(),
        Regex::new(r"^\s*\d{4}[/-]\d{1,2}[/-]\d{1,2}\s*$").unwrap(),
        Regex::new(r"^\s*(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}\s*$").unwrap(),
        Regex::new(r"^\s*\d{1,2}:\d{2}(?::\d{2})?\s*(?:am|pm)?\s*$").unwrap(),
        // OCR line references
        Regex::new(r"^\s*(?:line|lne|une|ln)\s*\d+\s*$").unwrap(),
    ];

    pub static ref SUSPICIOUS_NAMES: Vec<Regex> = vec![
        Regex::new(r"^[A-Za-z]{1,2}$").unwrap(),
        Regex::new(r"^\d{3,}$").unwrap(),
        Regex::new(r"^[A-Za-z]{1,3}\s+\d+$").unwrap(),
        Regex::new(r"^\d+[:\s]+[A-Za-z]{1,2}$").unwrap(),
        Regex::new(r"^[A-Za-z]\s[A-Za-z]$").unwrap(),
    ];

    // Name cleaning passes
    pub static ref PROMO_PASS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"^\d{1,2}\.\s+").unwrap(), ""),
        (Regex::new(r"(?i)^.*?\bbuy\s+(?:one|two|\d+)[,;\s]*(?:get|receive)\s+(?:one|two|\d+)\b.*$").unwrap(), ""),
        (Regex::new(r"(?i)^.*?\b(?:bogo|b1g1)\b.*$").unwrap(), ""),
        (Regex::new(r"(?i)^(?:special\s+offer|daily\s+special|combo\s+deal|meal\s+deal|promotion|promo|deal|offer)\b[\s:-]*").unwrap(), ""),
        (Regex::new(r"(?i)^\d+\s*x\s+").unwrap(), ""),
        (Regex::new(r"^\d{1,2}\s+(\p{L})").unwrap(), "$1"),
    ];

    pub static ref CODE_PASS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)[\s-]*\b(?:line|lne|une|ln)\s*\d+\b").unwrap(), " "),
        (Regex::new(r"^\d{1,2}\s*[:.]\s*\d{3,6}\s+").unwrap(), ""),
        (Regex::new(r"^\d{1,2}:\s*").unwrap(), ""),
        (Regex::new(r"^\d+:\d+[,\s]*").unwrap(), ""),
        (Regex::new(r"^\d{3,6}[:\s]+").unwrap(), ""),
        (Regex::new(r"\s+\d{3,6}\s*$").unwrap(), ""),
    ];

    pub static ref MEASUREMENT_PASS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"\s+@.*$").unwrap(), ""),
        (Regex::new(r"(?i)\s+\d+(?:[.,]\d+)?\s*(?:kg|kq|g|lbs?|oz|ml|l)\b.*$").unwrap(), ""),
        (Regex::new(r"(?i)\s+(?:net|ea|each|pkg|package|per)\b.*$").unwrap(), ""),
        (Regex::new(r"(?i)\s*/\s*(?:kg|kq|lb|oz)\b").unwrap(), ""),
    ];

    pub static ref PUNCTUATION_PASS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"[,.;:]{2,}").unwrap(), " "),
        (Regex::new(r"\s*[,.:;]+\s*$").unwrap(), ""),
        (Regex::new(r"\s*[-_=+]+\s*$").unwrap(), ""),
        (Regex::new(r"\s{2,}").unwrap(), " "),
    ];

    pub static ref LEAKED_PHRASE_PASS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\s+(?:add|no|extra|side|with|without|hold)\s+.*$").unwrap(), ""),
        (Regex::new(r"(?i)\b(?:take[\s-]?out|dine[\s-]?in|to\s+go|for\s+here|drive[\s-]?thru)\b").unwrap(), ""),
        (Regex::new(r"(?i)\b(?:credit|debit)\s+card\b").unwrap(), ""),
        (Regex::new(r"(?i)^(?:duy\s+ona|gel\s+one)\b.*$").unwrap(), ""),
        (Regex::new(r"(?i)^.*\bget\s+one\s+(?:une|line)\b.*$").unwrap(), ""),
    ];

    pub static ref EDGE_NOISE: Regex = Regex::new(
        r"^[^\p{L}\p{N}]+|[^\p{L}\p{N}]+$"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    pub static ref SUB_ITEM_COUNT: Regex = Regex::new(r"^\d+\s+").unwrap();

    // Receipt dates
    pub static ref DATE_MDY: Regex = Regex::new(
        r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b"
    ).unwrap();

    pub static ref DATE_MDY_SHORT: Regex = Regex::new(
        r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{2})\b"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_MONTH_FIRST: Regex = Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b"
    ).unwrap();

    pub static ref DATE_DAY_FIRST: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{4})\b"
    ).unwrap();

    pub static ref DATE_LABELED: Regex = Regex::new(
        r"(?i)\bdate\s*:?\s*(\d{1,2})[./-](\d{1,2})[./-](\d{2,4})\b"
    ).unwrap();

    pub static ref TIME_OF_DAY: Regex = Regex::new(
        r"\b\d{1,2}:\d{2}(?::\d{2})?\b"
    ).unwrap();

    // Totals
    pub static ref TOTAL_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:total|amount\s+due|balance\s+due|totale|gesamt|summe|importe)\b"
    ).unwrap();

    pub static ref SUBTOTAL_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:sub[\s-]?total|subtotale|zwischensumme|sous-total|item\s+total)\b"
    ).unwrap();

    pub static ref TOTAL_GUARD: Regex = Regex::new(r"(?i)sub|item").unwrap();

    pub static ref TAX_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:tax|gst|hst|pst|vat|iva|tva|mwst)\b"
    ).unwrap();

    pub static ref TOTAL_TAX: Regex = Regex::new(
        r"(?i)\btotal\s+(?:tax|gst|hst|pst|vat|iva|tva|mwst)\b"
    ).unwrap();

    pub static ref TAX_ID_GUARD: Regex = Regex::new(
        r"(?i)invoice|\breg\b|number|\bno\b|\bid\b|#"
    ).unwrap();

    // Merchant
    pub static ref NUMERIC_LINE: Regex = Regex::new(r"^[\d\s\-.()+/#:]+$").unwrap();
}
