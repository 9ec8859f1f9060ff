//! Transaction date extraction.
//!
//! Receipts are mostly US-style (`MM/DD/YYYY`). Numeric dates whose first
//! part cannot be a month are read day-first instead.

use chrono::NaiveDate;
use regex::{Captures, Regex};

use super::patterns::{
    DATE_DAY_FIRST, DATE_ISO, DATE_LABELED, DATE_MDY, DATE_MDY_SHORT, DATE_MONTH_FIRST,
};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;

/// Date field extractor.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    year_pivot: u32,
}

#[derive(Clone, Copy)]
enum DateShape {
    MonthDayYear,
    MonthDayShortYear,
    Iso,
    MonthNameFirst,
    DayMonthName,
    LabeledDayFirst,
}

impl DateShape {
    const PRIORITY: [DateShape; 6] = [
        Self::MonthDayYear,
        Self::MonthDayShortYear,
        Self::Iso,
        Self::MonthNameFirst,
        Self::DayMonthName,
        Self::LabeledDayFirst,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::MonthDayYear => &DATE_MDY,
            Self::MonthDayShortYear => &DATE_MDY_SHORT,
            Self::Iso => &DATE_ISO,
            Self::MonthNameFirst => &DATE_MONTH_FIRST,
            Self::DayMonthName => &DATE_DAY_FIRST,
            Self::LabeledDayFirst => &DATE_LABELED,
        }
    }

    fn confidence(self) -> f32 {
        match self {
            Self::Iso | Self::MonthNameFirst | Self::DayMonthName => 0.95,
            Self::MonthDayYear | Self::LabeledDayFirst => 0.9,
            Self::MonthDayShortYear => 0.8,
        }
    }
}

impl DateExtractor {
    pub fn new() -> Self {
        Self::with_pivot(ExtractionConfig::default().two_digit_year_pivot)
    }

    /// Two-digit years below `pivot` map to 20xx, the rest to 19xx.
    pub fn with_pivot(pivot: u32) -> Self {
        Self { year_pivot: pivot }
    }

    fn resolve(&self, shape: DateShape, caps: &Captures) -> Option<NaiveDate> {
        let num = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();

        match shape {
            DateShape::MonthDayYear | DateShape::MonthDayShortYear => {
                let (first, second) = (num(1)?, num(2)?);
                let year = self.full_year(num(3)?);
                // 13/05/2019 cannot be month-first
                let (month, day) = if first > 12 { (second, first) } else { (first, second) };
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateShape::Iso => NaiveDate::from_ymd_opt(num(1)? as i32, num(2)?, num(3)?),
            DateShape::MonthNameFirst => {
                let month = month_from_name(caps.get(1)?.as_str())?;
                NaiveDate::from_ymd_opt(num(3)? as i32, month, num(2)?)
            }
            DateShape::DayMonthName => {
                let month = month_from_name(caps.get(2)?.as_str())?;
                NaiveDate::from_ymd_opt(num(3)? as i32, month, num(1)?)
            }
            DateShape::LabeledDayFirst => {
                let year = self.full_year(num(3)?);
                NaiveDate::from_ymd_opt(year, num(2)?, num(1)?)
            }
        }
    }

    fn full_year(&self, year: u32) -> i32 {
        let year = year as i32;
        if year >= 100 {
            year
        } else if year < self.year_pivot as i32 {
            2000 + year
        } else {
            1900 + year
        }
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    /// First valid date of the highest-priority shape.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for shape in DateShape::PRIORITY {
            for caps in shape.pattern().captures_iter(text) {
                let Some(date) = self.resolve(shape, &caps) else {
                    continue;
                };
                if results.iter().any(|r| r.value == date) {
                    continue;
                }
                let Some(full_match) = caps.get(0) else {
                    continue;
                };
                results.push(
                    ExtractionMatch::new(date, shape.confidence(), full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        results
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn first(text: &str) -> Option<NaiveDate> {
        DateExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_month_first_numeric() {
        assert_eq!(first("DATE         06/01/2019        WED"), Some(date(2019, 6, 1)));
        assert_eq!(first("12-25-2023"), Some(date(2023, 12, 25)));
    }

    #[test]
    fn test_day_first_when_month_impossible() {
        assert_eq!(first("25/12/2023"), Some(date(2023, 12, 25)));
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(first("06/01/19"), Some(date(2019, 6, 1)));
        assert_eq!(first("06/01/75"), Some(date(1975, 6, 1)));
        let extractor = DateExtractor::with_pivot(80);
        assert_eq!(extractor.extract("06/01/75").map(|m| m.value), Some(date(2075, 6, 1)));
    }

    #[test]
    fn test_iso_and_month_names() {
        assert_eq!(first("2024-01-15"), Some(date(2024, 1, 15)));
        assert_eq!(
            first("Invoice No. 10       Date: May 11, 2019"),
            Some(date(2019, 5, 11))
        );
        assert_eq!(first("Sept. 3rd 2021"), Some(date(2021, 9, 3)));
        assert_eq!(first("11 November 2020"), Some(date(2020, 11, 11)));
    }

    #[test]
    fn test_labeled_dotted_date() {
        assert_eq!(first("Date: 11.05.2019"), Some(date(2019, 5, 11)));
    }

    #[test]
    fn test_invalid_dates_are_skipped() {
        assert_eq!(first("13/13/2020"), None);
        assert_eq!(first("Feb 30, 2021"), None);
        assert_eq!(first("no date here"), None);
    }

    #[test]
    fn test_extract_all_deduplicates() {
        let extractor = DateExtractor::new();
        let all = extractor.extract_all("06/01/2019 ... 2019-06-01 ... Jun 2, 2019");
        let values: Vec<NaiveDate> = all.into_iter().map(|m| m.value).collect();
        assert_eq!(values, vec![date(2019, 6, 1), date(2019, 6, 2)]);
    }
}
