// ABOUTME: Free-text salary normalizer turning strings like "$120,000 - $150,000" into a min/max/currency triple.
// ABOUTME: Handles k suffixes, currency symbols and codes, and annualizes hourly rates.

//! Salary normalization.
//!
//! The first two numbers found become `min` and `max` in the order they
//! appear. A range written backwards ("150k - 120k") is kept backwards.

use once_cell::sync::Lazy;
use regex::Regex;

/// Working hours in a year: 40 hours a week, 52 weeks.
pub const HOURS_PER_YEAR: f64 = 2080.0;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)(k\b)?").expect("valid salary regex"));

const HOURLY_MARKERS: &[&str] = &["hour", "/hr", "per hr"];

/// Currency detection table, checked in order.
const CURRENCIES: &[(&[&str], &str)] = &[
    (&["£", "gbp"], "GBP"),
    (&["€", "eur"], "EUR"),
    (&["cad", "c$"], "CAD"),
    (&["aud", "a$"], "AUD"),
];

const DEFAULT_CURRENCY: &str = "USD";

/// A salary range parsed from one string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSalary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub currency: Option<String>,
}

impl ParsedSalary {
    /// Returns true if no number was recovered.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Infers the currency code from symbols or ISO codes in lower-cased text.
pub fn detect_currency(lower: &str) -> &'static str {
    CURRENCIES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, code)| *code)
        .unwrap_or(DEFAULT_CURRENCY)
}

/// Returns true if the lower-cased text describes an hourly rate.
pub fn is_hourly(lower: &str) -> bool {
    HOURLY_MARKERS.iter().any(|m| lower.contains(m))
}

/// Parses a free-text compensation string. Never fails; unparseable input yields an empty result.
pub fn parse_salary(text: &str) -> ParsedSalary {
    let lower = text.to_lowercase().replace(',', "");

    let hourly = is_hourly(&lower);
    let numbers: Vec<f64> = NUMBER_RE
        .captures_iter(&lower)
        .filter_map(|caps| {
            let mut value: f64 = caps.get(1)?.as_str().parse().ok()?;
            if caps.get(2).is_some() {
                value *= 1000.0;
            }
            if hourly {
                value *= HOURS_PER_YEAR;
            }
            Some(value)
        })
        .filter(|v| v.is_finite())
        .collect();

    let (min, max) = match numbers.as_slice() {
        [] => return ParsedSalary::default(),
        [only] => (*only, *only),
        [first, second, ..] => (*first, *second),
    };

    ParsedSalary {
        min: Some(min),
        max: Some(max),
        currency: Some(detect_currency(&lower).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn salary(min: f64, max: f64, currency: &str) -> ParsedSalary {
        ParsedSalary {
            min: Some(min),
            max: Some(max),
            currency: Some(currency.to_string()),
        }
    }

    #[test]
    fn dollar_range_with_separators() {
        assert_eq!(
            parse_salary("$120,000 - $150,000"),
            salary(120000.0, 150000.0, "USD")
        );
    }

    #[test]
    fn hourly_rate_is_annualized() {
        assert_eq!(parse_salary("$45/hour"), salary(93600.0, 93600.0, "USD"));
        assert_eq!(
            parse_salary("$20 - $25 per hr"),
            salary(41600.0, 52000.0, "USD")
        );
    }

    #[test]
    fn k_suffix_and_pound() {
        assert_eq!(parse_salary("£80k"), salary(80000.0, 80000.0, "GBP"));
    }

    #[test]
    fn k_suffix_on_both_ends() {
        assert_eq!(
            parse_salary("€55K–70K per year"),
            salary(55000.0, 70000.0, "EUR")
        );
    }

    #[test]
    fn currency_codes() {
        assert_eq!(parse_salary("CAD 90000").currency.as_deref(), Some("CAD"));
        assert_eq!(parse_salary("A$100k").currency.as_deref(), Some("AUD"));
        assert_eq!(parse_salary("100000 GBP").currency.as_deref(), Some("GBP"));
    }

    #[test]
    fn empty_and_non_numeric_yield_nothing() {
        assert_eq!(parse_salary(""), ParsedSalary::default());
        assert_eq!(parse_salary("Competitive"), ParsedSalary::default());
        assert!(parse_salary("DOE").is_empty());
    }

    #[test]
    fn reversed_range_is_kept_in_order_found() {
        let parsed = parse_salary("$150k - $120k");
        assert_eq!(parsed.min, Some(150000.0));
        assert_eq!(parsed.max, Some(120000.0));
    }

    #[test]
    fn only_first_two_numbers_count() {
        let parsed = parse_salary("$100k - $120k plus 10% bonus");
        assert_eq!(parsed.min, Some(100000.0));
        assert_eq!(parsed.max, Some(120000.0));
    }

    #[test]
    fn decimal_hourly() {
        let parsed = parse_salary("$22.50 an hour");
        assert_eq!(parsed.min, Some(46800.0));
    }

    #[test]
    fn overflowing_digits_are_dropped() {
        let huge = "1".repeat(400);
        assert!(parse_salary(&huge).is_empty());

        let parsed = parse_salary(&format!("$90k - ${huge}"));
        assert_eq!(parsed.min, Some(90000.0));
        assert_eq!(parsed.max, Some(90000.0));
    }
}
