//! Quantity, weight and unit price handling.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::amounts::AmountExtractor;
use super::patterns::{LEADING_QUANTITY, TABULAR_SPLIT, WEIGHT_TOKEN};

/// Unit printed next to a weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Kilogram,
    Gram,
    Pound,
    Ounce,
}

impl WeightUnit {
    fn parse(unit: &str) -> Option<Self> {
        match unit.to_lowercase().as_str() {
            "kg" | "kq" => Some(Self::Kilogram),
            "g" => Some(Self::Gram),
            "lb" | "lbs" => Some(Self::Pound),
            "oz" => Some(Self::Ounce),
            _ => None,
        }
    }

    /// Kilograms per one of this unit.
    pub fn to_kilograms(self) -> Decimal {
        match self {
            Self::Kilogram => Decimal::ONE,
            Self::Gram => Decimal::new(1, 3),
            Self::Pound => Decimal::new(453_592, 6),
            Self::Ounce => Decimal::new(283_495, 7),
        }
    }
}

/// A weight found in a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Weight {
    /// Number as printed.
    pub value: Decimal,
    /// Printed unit.
    pub unit: WeightUnit,
    /// Byte span of the weight token.
    pub span: (usize, usize),
}

impl Weight {
    pub fn kilograms(&self) -> Decimal {
        (self.value * self.unit.to_kilograms()).normalize()
    }
}

/// Find the first weight token ("0.442kg", "2 lb") in a line.
pub fn extract_weight(text: &str) -> Option<Weight> {
    WEIGHT_TOKEN.captures_iter(text).find_map(|caps| {
        let number = caps.get(1)?;
        let unit = WeightUnit::parse(caps.get(2)?.as_str())?;
        let value = Decimal::from_str(&number.as_str().replace(',', ".")).ok()?;
        if value <= Decimal::ZERO {
            return None;
        }
        Some(Weight {
            value,
            unit,
            span: (number.start(), caps.get(0)?.end()),
        })
    })
}

/// Unit price for a line total; falls back to the price itself when the
/// quantity is not positive.
pub fn compute_unit_price(price: Decimal, quantity: Decimal) -> Decimal {
    if quantity <= Decimal::ZERO {
        return price;
    }
    price
        .checked_div(quantity)
        .map(|p| p.round_dp(4).normalize())
        .unwrap_or(price)
}

/// Quantity, price and residual name text of one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFields {
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub weight: Option<Weight>,
    /// Line text with price, quantity and weight removed.
    pub remainder: String,
}

/// Split a line into quantity, price and name text.
///
/// Tabular rows (`name  qty  rate  amount`) are recognized first. Otherwise
/// the price is located and removed, then a weight or a leading count.
pub fn split_line_fields(amounts: &AmountExtractor, line: &str) -> LineFields {
    let line = line.trim();

    if let Some(fields) = split_tabular(amounts, line) {
        return fields;
    }

    let mut remainder = line.to_string();
    let price = amounts.locate_price(line).map(|found| {
        if let Some((start, end)) = found.position {
            remainder = format!("{} {}", &line[..start], &line[end..]);
        }
        found.value
    });
    let mut remainder = remainder.trim().to_string();

    let weight = extract_weight(&remainder);
    let mut quantity = Decimal::ONE;
    if let Some(weight) = &weight {
        quantity = weight.kilograms();
        let (start, end) = weight.span;
        remainder = format!("{} {}", &remainder[..start], &remainder[end..])
            .trim()
            .to_string();
    } else if let Some(caps) = LEADING_QUANTITY.captures(&remainder) {
        let count = Decimal::from_str(&caps[1]).unwrap_or(Decimal::ONE);
        if count > Decimal::ZERO {
            quantity = count;
        }
        let end = caps.get(0).map_or(0, |m| m.end());
        remainder = remainder[end..].to_string();
    }

    LineFields {
        quantity,
        price,
        weight,
        remainder,
    }
}

fn split_tabular(amounts: &AmountExtractor, line: &str) -> Option<LineFields> {
    let fields: Vec<&str> = TABULAR_SPLIT
        .split(line)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();
    if fields.len() < 3 {
        return None;
    }

    let mut numbers = Vec::new();
    let mut words = Vec::new();
    for field in &fields {
        match numeric_field(amounts, field) {
            Some(value) => numbers.push(value),
            None => words.push(*field),
        }
    }
    if numbers.len() < 2 || words.is_empty() {
        return None;
    }

    let quantity = numbers[0];
    let price = numbers[numbers.len() - 1];
    Some(LineFields {
        quantity: if quantity > Decimal::ZERO { quantity } else { Decimal::ONE },
        price: Some(price),
        weight: None,
        remainder: words.join(" "),
    })
}

fn numeric_field(amounts: &AmountExtractor, field: &str) -> Option<Decimal> {
    let looks_numeric = field.chars().count() < 15
        && field.chars().any(|c| c.is_ascii_digit())
        && field.chars().all(|c| {
            c.is_ascii_digit() || matches!(c, '.' | ',' | ' ' | '$' | '€' | '£' | '¥' | '₹')
        });
    if !looks_numeric {
        return None;
    }
    amounts.normalize(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_extract_weight_kg() {
        let weight = extract_weight("0.442kg NET @ $2.99/kg").unwrap();
        assert_eq!(weight.unit, WeightUnit::Kilogram);
        assert_eq!(weight.kilograms(), dec("0.442"));
        assert_eq!(weight.span, (0, 7));
    }

    #[test]
    fn test_extract_weight_conversions() {
        assert_eq!(extract_weight("Flour 500g").unwrap().kilograms(), dec("0.5"));
        assert_eq!(extract_weight("Beef 2 lb").unwrap().kilograms(), dec("0.907184"));
        assert_eq!(extract_weight("Nuts 0,75 kg").unwrap().kilograms(), dec("0.75"));
        assert!(extract_weight("$2.99/kg").is_none());
    }

    #[test]
    fn test_compute_unit_price() {
        assert_eq!(compute_unit_price(dec("440"), dec("2")), dec("220"));
        assert_eq!(compute_unit_price(dec("3.99"), Decimal::ZERO), dec("3.99"));
        assert_eq!(compute_unit_price(dec("1.32"), dec("0.442")), dec("2.9864"));
    }

    #[test]
    fn test_split_leading_quantity() {
        let amounts = AmountExtractor::new();
        let fields = split_line_fields(&amounts, "1 2 Burritos EVM 6.99");
        assert_eq!(fields.quantity, dec("1"));
        assert_eq!(fields.price, Some(dec("6.99")));
        assert_eq!(fields.remainder, "2 Burritos EVM");

        let fields = split_line_fields(&amounts, "2 x Milk 3.98");
        assert_eq!(fields.quantity, dec("2"));
        assert_eq!(fields.remainder, "Milk");
    }

    #[test]
    fn test_split_weight_line() {
        let amounts = AmountExtractor::new();
        let fields = split_line_fields(&amounts, "Apples 1.2kg $3.60");
        assert_eq!(fields.quantity, dec("1.2"));
        assert_eq!(fields.price, Some(dec("3.60")));
        assert_eq!(fields.remainder, "Apples");
    }

    #[test]
    fn test_split_tabular_row() {
        let amounts = AmountExtractor::new();
        let fields = split_line_fields(&amounts, "Pasta             2    220.0    440.0");
        assert_eq!(fields.quantity, dec("2"));
        assert_eq!(fields.price, Some(dec("440.0")));
        assert_eq!(fields.remainder, "Pasta");

        let fields = split_line_fields(&amounts, "Pizza Makhaani - Full  1    190.0    190.0");
        assert_eq!(fields.remainder, "Pizza Makhaani - Full");
        assert_eq!(fields.quantity, dec("1"));
    }

    #[test]
    fn test_split_without_price() {
        let amounts = AmountExtractor::new();
        let fields = split_line_fields(&amounts, "ADD Cream");
        assert_eq!(fields.price, None);
        assert_eq!(fields.quantity, Decimal::ONE);
        assert_eq!(fields.remainder, "ADD Cream");
    }
}
