//! Receipt text split into indexed, indentation-aware lines.

use super::rules::patterns::HAS_PRICE;

/// One non-blank line of OCR text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    /// Position among non-blank lines.
    pub index: usize,
    /// Line with trailing whitespace removed.
    pub raw: String,
    /// Line with both ends trimmed.
    pub text: String,
    /// Count of leading whitespace characters.
    pub indent: usize,
    /// Contains a two-decimal number.
    pub has_price: bool,
}

/// Split OCR text into non-blank lines. Handles `\n` and `\r\n`.
pub fn split_lines(text: &str) -> Vec<ReceiptLine> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, raw)| {
            let text = raw.trim_start();
            ReceiptLine {
                index,
                raw: raw.to_string(),
                text: text.to_string(),
                indent: raw.chars().take_while(|c| c.is_whitespace()).count(),
                has_price: HAS_PRICE.is_match(text),
            }
        })
        .collect()
}
