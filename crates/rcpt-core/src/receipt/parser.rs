//! Receipt parser combining layout strategies with metadata extraction.

use std::sync::Arc;
use tracing::{debug, info};

use super::flat::FlatParser;
use super::hierarchical::HierarchicalParser;
use super::items::ItemRules;
use super::lines::{split_lines, ReceiptLine};
use super::rules::{extract_totals, DateExtractor, FieldExtractor, MerchantExtractor};
use super::{ReceiptExtractor, StructuringParser};
use crate::error::Result;
use crate::models::config::ParserConfig;
use crate::models::receipt::{ParsedItem, ReceiptLayout, ReceiptSummary};

/// Heuristic parser for OCR receipt text.
///
/// Immutable after construction; share it across threads freely.
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    rules: ItemRules,
    dates: DateExtractor,
    merchant: MerchantExtractor,
    config: Arc<ParserConfig>,
}

impl ReceiptParser {
    /// Create a parser with the built-in lexicon and default thresholds.
    pub fn new() -> Self {
        let config = ParserConfig::default();
        Self {
            rules: ItemRules::default(),
            dates: DateExtractor::with_pivot(config.extraction.two_digit_year_pivot),
            merchant: MerchantExtractor::default(),
            config: Arc::new(config),
        }
    }

    /// Create a parser from a validated configuration.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rules: ItemRules::new(&config)?,
            dates: DateExtractor::with_pivot(config.extraction.two_digit_year_pivot),
            merchant: MerchantExtractor::new(&config.lexicon, &config.extraction),
            config: Arc::new(config),
        })
    }

    /// Configuration this parser was built from.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Extract line items. Never fails; unusable text yields no items.
    pub fn parse_items(&self, text: &str) -> Vec<ParsedItem> {
        self.structure(&split_lines(text)).0
    }

    /// Extract items plus merchant, date, totals and review warnings.
    pub fn parse_receipt(&self, text: &str) -> ReceiptSummary {
        let lines = split_lines(text);
        info!("Parsing receipt from {} lines", lines.len());

        let (items, layout) = self.structure(&lines);
        let totals = extract_totals(&self.rules.amounts, lines.iter().map(|l| l.text.as_str()));

        let mut summary = ReceiptSummary {
            items,
            merchant_name: self.merchant.extract(text).map(|m| m.value),
            date: self.dates.extract(text).map(|m| m.value),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            layout,
            line_count: lines.len(),
            warnings: Vec::new(),
        };
        summary.warnings = summary.validate();

        debug!(
            "Parsed receipt: {} items ({:?}), merchant={:?}, total={:?}",
            summary.items.len(),
            summary.layout,
            summary.merchant_name,
            summary.total
        );

        summary
    }

    /// Run the hierarchical strategy, then the flat one if it found nothing.
    fn structure(&self, lines: &[ReceiptLine]) -> (Vec<ParsedItem>, ReceiptLayout) {
        let strategies: [&dyn StructuringParser; 2] = [&HierarchicalParser, &FlatParser];

        for strategy in strategies {
            let items = strategy.structure(&self.rules, lines);
            if !items.is_empty() {
                info!("{:?} layout produced {} items", strategy.layout(), items.len());
                return (items, strategy.layout());
            }
            debug!("{:?} layout produced no items", strategy.layout());
        }

        (Vec::new(), ReceiptLayout::Empty)
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptExtractor for ReceiptParser {
    fn extract_items(&self, text: &str) -> Vec<ParsedItem> {
        self.parse_items(text)
    }

    fn extract_summary(&self, text: &str) -> ReceiptSummary {
        self.parse_receipt(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RcptError;
    use crate::models::lexicon::LEXICON_VERSION;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const FAST_FOOD: &str = "
485

KS# 4                           08:13:56 AM
QTY ITEM                        TOTAL
  1 Buy One, Get One             3.99
    1 Sausage Egg McMuffin
    1 Sausage Egg McMuffin
  1 2 Burritos EVM                6.99
    1 S Coffee
      ADD Cream
  1 2 Hash Browns                 0.80
1 M Iced Coffee                  1.40
      NO Liquid Sugar

Subtotal                         13.18
GST                               0.66
Take-Out Total                   13.84
CREDIT CARD                      13.84
Change                            0.00
";

    const GROCERY: &str = "
COLES SUPERMARKET
123 MAIN ST
MELBOURNE VIC 3000

TAX INVOICE
DATE: 15/05/2024
TIME: 14:30:25

ZUCHINNI GREEN 2.98
BANANA CAVENDISH 5.98
0.442kg NET @ $2.99/kg
POTATOES BRUSHED 3.00
BROCCOLI 3.98
SPECIAL 2.50
BRUSSEL SPROUTS 4.98
0.322kg NET @ $4.99/kg
GRAPES GREEN 8.99
PEAS SNOW 6.50
TOMATOES GRAPE 5.49
LETTUCE ICEBERG 2.50

SUBTOTAL $47.88
GST $4.35
TOTAL $52.23

LOYALTY POINTS: 52
CHANGE $25.80

THANK YOU FOR SHOPPING
VISIT US AT COLES.COM.AU
";

    const NUMBERED: &str = "LOREM SHOP
123 ANYWHERE ST

1: 0275 Ut wisi enim           2.99
2: 1227 Nibh euismod            1.30
3: 0942 Rdol magna             17.00
4: 0257 Mnonuy nibh             6.99
5: 1693 Kaoreet dolore          1.20
6: 9463 Taliquam erat           5.10
7: 0059 Aeuismod               10.00
8: 3556 Knonuy nib              4.99

Discount                       $5.99
TOTAL                          $34.50";

    const TABULAR: &str = "Invoice No. 10                           Date: May 11, 2019

Item Name         Qty    Rate    Amount
Pizza Large        1    430.0    430.0
Pasta             2    220.0    440.0
Pizza Makhaani - Full  1    190.0    190.0
                           Total:  1,060.0";

    #[test]
    fn test_fast_food_items() {
        let items = ReceiptParser::new().parse_items(FAST_FOOD);
        let got: Vec<(&str, Decimal)> = items.iter().map(|i| (i.name.as_str(), i.price)).collect();
        assert_eq!(
            got,
            vec![
                ("Sausage Egg McMuffin", dec("3.99")),
                ("Sausage Egg McMuffin", dec("3.99")),
                ("Burritos Evm", dec("6.99")),
                ("S Coffee", dec("6.99")),
                ("Hash Browns", dec("0.80")),
                ("M Iced Coffee", dec("1.40")),
            ]
        );
    }

    #[test]
    fn test_fast_food_summary() {
        let summary = ReceiptParser::new().parse_receipt(FAST_FOOD);
        assert_eq!(summary.layout, ReceiptLayout::Hierarchical);
        assert_eq!(summary.subtotal, Some(dec("13.18")));
        assert_eq!(summary.tax, Some(dec("0.66")));
        assert_eq!(summary.total, Some(dec("13.84")));
        assert_eq!(summary.merchant_name, None);
        assert!(summary.warnings.is_empty(), "{:?}", summary.warnings);
    }

    #[test]
    fn test_grocery_weights() {
        let summary = ReceiptParser::new().parse_receipt(GROCERY);
        assert_eq!(summary.items.len(), 9);
        assert_eq!(summary.merchant_name.as_deref(), Some("COLES SUPERMARKET"));
        assert_eq!(summary.date, NaiveDate::from_ymd_opt(2024, 5, 15));
        assert_eq!(summary.total, Some(dec("52.23")));
        assert_eq!(summary.subtotal, Some(dec("47.88")));
        assert_eq!(summary.tax, Some(dec("4.35")));

        let banana = summary
            .items
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case("banana cavendish"))
            .unwrap();
        assert_eq!(banana.quantity, dec("0.442"));
        assert_eq!(banana.unit.as_deref(), Some("kg"));

        assert!(summary.items.iter().all(|i| !i.name.to_uppercase().contains("SPECIAL")));
        assert!(summary.items.iter().any(|i| i.name == "Peas Snow"));
    }

    #[test]
    fn test_weighed_unit_price() {
        let items = ReceiptParser::new().parse_items("BANANA CAVENDISH $1.32\n0.442kg NET @ $2.99/kg");
        assert_eq!(items.len(), 1);
        assert!(items[0].name.eq_ignore_ascii_case("banana cavendish"));
        assert_eq!(items[0].quantity, dec("0.442"));
        assert!((items[0].unit_price - dec("2.99")).abs() < dec("0.01"));
    }

    #[test]
    fn test_numbered_code_lines() {
        let summary = ReceiptParser::new().parse_receipt(NUMBERED);
        let names: Vec<&str> = summary.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Ut Wisi Enim",
                "Nibh Euismod",
                "Rdol Magna",
                "Mnonuy Nibh",
                "Kaoreet Dolore",
                "Taliquam Erat",
                "Aeuismod",
                "Knonuy Nib",
            ]
        );
        assert_eq!(summary.merchant_name.as_deref(), Some("LOREM SHOP"));
        assert_eq!(summary.total, Some(dec("34.50")));
    }

    #[test]
    fn test_numbered_code_keeps_descriptive_text() {
        let items = ReceiptParser::new().parse_items("5: 1095 Aeuismod                    $10.00");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Aeuismod");
        assert_eq!(items[0].price, dec("10.00"));
    }

    #[test]
    fn test_total_including_gst() {
        let summary = ReceiptParser::new().parse_receipt("Milk 3.50\nTOTAL INCL GST $52.23");
        assert_eq!(summary.total, Some(dec("52.23")));
        assert_eq!(summary.tax, None);
        assert_eq!(summary.items.len(), 1);
    }

    #[test]
    fn test_three_decimal_price_is_not_truncated() {
        let summary = ReceiptParser::new().parse_receipt("Kaffee 1.234\nTotal 1.234");
        assert_eq!(summary.total, Some(dec("1.234")));
        assert!(summary.items.iter().all(|i| i.price == dec("1.234")));
    }

    #[test]
    fn test_tabular_invoice_uses_flat_layout() {
        let summary = ReceiptParser::new().parse_receipt(TABULAR);
        assert_eq!(summary.layout, ReceiptLayout::Flat);
        assert_eq!(summary.items.len(), 3);

        assert_eq!(summary.items[0].name, "Pizza Large");
        assert_eq!(summary.items[0].quantity, dec("1"));
        assert_eq!(summary.items[0].price, dec("430"));
        assert_eq!(summary.items[1].name, "Pasta");
        assert_eq!(summary.items[1].quantity, dec("2"));
        assert_eq!(summary.items[1].unit_price, dec("220"));
        assert_eq!(summary.items[2].name, "Pizza Makhaani - Full");

        assert_eq!(summary.total, Some(dec("1060")));
        assert_eq!(summary.date_iso().as_deref(), Some("2019-05-11"));
    }

    #[test]
    fn test_admin_only_text() {
        let parser = ReceiptParser::new();
        assert!(parser.parse_items("Subtotal 13.18").is_empty());
        assert!(parser.parse_items("").is_empty());

        let summary = parser.parse_receipt("   \n\n");
        assert_eq!(summary.layout, ReceiptLayout::Empty);
        assert_eq!(summary.line_count, 0);
        assert!(summary.warnings.iter().any(|w| w == "No items extracted"));
    }

    #[test]
    fn test_food_overrides_tax_keyword() {
        let items = ReceiptParser::new().parse_items("GST Crackers    3.99");
        assert_eq!(items.len(), 1);
        assert!(items[0].name.contains("Crackers"));
    }

    #[test]
    fn test_outputs_are_positive() {
        let parser = ReceiptParser::new();
        for text in [FAST_FOOD, GROCERY, NUMBERED, TABULAR] {
            for item in parser.parse_items(text) {
                assert!(item.price > Decimal::ZERO, "{item:?}");
                assert!(item.quantity > Decimal::ZERO, "{item:?}");
                assert!(item.unit_price > Decimal::ZERO, "{item:?}");
                assert!(item.name.chars().count() >= 3, "{item:?}");
            }
        }
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let parser = ReceiptParser::new();
        assert_eq!(parser.parse_items(GROCERY), parser.parse_items(GROCERY));
    }

    #[test]
    fn test_with_config_disables_weight_merge() {
        let mut config = ParserConfig::default();
        config.extraction.merge_weight_lines = false;
        let parser = ReceiptParser::with_config(config).unwrap();
        let items = parser.parse_items("BANANA CAVENDISH $1.32\n0.442kg NET @ $2.99/kg");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, Decimal::ONE);
    }

    #[test]
    fn test_with_config_custom_vocabulary() {
        let mut config = ParserConfig::default();
        config.lexicon = config.lexicon.with_food_terms(["tender"]);
        let parser = ReceiptParser::with_config(config).unwrap();
        let items = parser.parse_items("Chicken Tender Box 8.99\nTENDER 8.99");
        assert!(items.iter().any(|i| i.name == "Tender"));
    }

    #[test]
    fn test_with_config_rejects_newer_lexicon() {
        let mut config = ParserConfig::default();
        config.lexicon.version = LEXICON_VERSION + 1;
        let err = ReceiptParser::with_config(config).unwrap_err();
        assert!(matches!(err, RcptError::Lexicon(_)));
    }
}
