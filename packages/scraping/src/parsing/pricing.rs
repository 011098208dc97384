//! Heuristic price detection in free text.
//!
//! Finds a currency symbol or ISO code adjacent to a number, or the
//! literal word "free". When several price-like tokens exist the parser
//! commits to the first occurrence in document order — a deliberate,
//! simple tie-break; tiered pricing pages are not disambiguated.

use regex::Regex;

use crate::types::product::{BillingInterval, Pricing};

/// Fixed symbol table. Bare ISO codes of the same currencies are also
/// recognized; extend here when a new market matters.
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("$", "USD"),
    ("€", "EUR"),
    ("£", "GBP"),
    ("¥", "JPY"),
];

/// How far past the amount interval markers are honored (chars).
const INTERVAL_WINDOW: usize = 32;

const MONTHLY_MARKERS: &[&str] = &["/month", "per month", "/mo", "monthly"];
const YEARLY_MARKERS: &[&str] = &["/year", "per year", "/yr", "yearly", "annually"];

struct MoneyMatch {
    start: usize,
    end: usize,
    amount: f64,
    currency: Option<String>,
}

/// Price parser with pre-compiled patterns. Cheap to share; the agent
/// holds one instance for its lifetime.
pub struct PricingParser {
    symbol_amount: Regex,
    amount_code: Regex,
    free: Regex,
}

impl Default for PricingParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PricingParser {
    pub fn new() -> Self {
        Self {
            // "$29.99", "USD 29.99"
            symbol_amount: Regex::new(r"(?i)([$€£¥]|\b(?:USD|EUR|GBP|JPY)\b)\s*(\d+(?:[.,]\d+)*)")
                .unwrap(),
            // "29.99 USD", "1.299,99 €"
            amount_code: Regex::new(r"(?i)(\d+(?:[.,]\d+)*)\s*(USD|EUR|GBP|JPY|[$€£¥])").unwrap(),
            free: Regex::new(r"(?i)\bfree\b").unwrap(),
        }
    }

    /// Detect pricing in `text`, or `None` when nothing price-like exists.
    pub fn parse(&self, text: &str) -> Option<Pricing> {
        let money = self.first_money_match(text);
        let free_at = self.free.find(text).map(|m| m.start());

        match (money, free_at) {
            (Some(money), Some(free)) if free < money.start => Some(Pricing::free()),
            (Some(money), _) => Some(build_pricing(text, money)),
            (None, Some(_)) => Some(Pricing::free()),
            (None, None) => None,
        }
    }

    /// Earliest parseable money token across both adjacency forms.
    fn first_money_match(&self, text: &str) -> Option<MoneyMatch> {
        let before = first_match(&self.symbol_amount, text, 1, 2);
        let after = first_match(&self.amount_code, text, 2, 1);

        match (before, after) {
            (Some(a), Some(b)) => Some(if a.start <= b.start { a } else { b }),
            (a, b) => a.or(b),
        }
    }
}

fn first_match(
    re: &Regex,
    text: &str,
    currency_group: usize,
    amount_group: usize,
) -> Option<MoneyMatch> {
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(raw_amount) = caps.get(amount_group) else { continue };
        let Some(amount) = normalize_amount(raw_amount.as_str()) else { continue };

        let currency = caps
            .get(currency_group)
            .and_then(|m| currency_for(m.as_str()));

        return Some(MoneyMatch {
            start: whole.start(),
            end: whole.end(),
            amount,
            currency,
        });
    }
    None
}

fn build_pricing(text: &str, money: MoneyMatch) -> Pricing {
    match detect_interval(text, money.end) {
        Some(interval) => Pricing::subscription(money.amount, money.currency, interval),
        None => Pricing::one_time(money.amount, money.currency),
    }
}

/// Resolve a raw numeric token to an amount.
///
/// Locale rule: a separator followed by exactly two digits is the decimal
/// point; every other separator is a thousands separator.
fn normalize_amount(raw: &str) -> Option<f64> {
    let separators: Vec<usize> = raw
        .char_indices()
        .filter(|(_, c)| matches!(c, '.' | ','))
        .map(|(i, _)| i)
        .collect();

    let Some(&last) = separators.last() else {
        return raw.parse().ok();
    };

    let cleaned: String = if raw.len() - last - 1 == 2 {
        raw.char_indices()
            .filter_map(|(i, c)| match c {
                '.' | ',' if i == last => Some('.'),
                '.' | ',' => None,
                _ => Some(c),
            })
            .collect()
    } else {
        raw.chars().filter(char::is_ascii_digit).collect()
    };

    cleaned.parse().ok()
}

fn currency_for(token: &str) -> Option<String> {
    let token = token.trim();
    if token.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some(token.to_ascii_uppercase());
    }
    CURRENCY_SYMBOLS
        .iter()
        .find(|(symbol, _)| *symbol == token)
        .map(|(_, code)| (*code).to_string())
}

/// Look for an interval marker in a bounded window after the amount.
fn detect_interval(text: &str, from: usize) -> Option<BillingInterval> {
    let window: String = text[from..]
        .chars()
        .take(INTERVAL_WINDOW)
        .collect::<String>()
        .to_lowercase();

    let earliest = |markers: &[&str]| markers.iter().filter_map(|m| window.find(m)).min();

    match (earliest(MONTHLY_MARKERS), earliest(YEARLY_MARKERS)) {
        (Some(monthly), Some(yearly)) if yearly < monthly => Some(BillingInterval::Yearly),
        (Some(_), _) => Some(BillingInterval::Monthly),
        (None, Some(_)) => Some(BillingInterval::Yearly),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::product::PricingKind;
    use proptest::prelude::*;

    fn parse(text: &str) -> Option<Pricing> {
        PricingParser::new().parse(text)
    }

    #[test]
    fn test_one_time_dollar_price() {
        let pricing = parse("Price: $29.99").unwrap();
        assert_eq!(pricing.amount, Some(29.99));
        assert_eq!(pricing.currency.as_deref(), Some("USD"));
        assert_eq!(pricing.kind, PricingKind::OneTime);
        assert!(pricing.interval.is_none());
    }

    #[test]
    fn test_monthly_subscription() {
        let pricing = parse("€49.99/month").unwrap();
        assert_eq!(pricing.amount, Some(49.99));
        assert_eq!(pricing.currency.as_deref(), Some("EUR"));
        assert_eq!(pricing.kind, PricingKind::Subscription);
        assert_eq!(pricing.interval, Some(BillingInterval::Monthly));
    }

    #[test]
    fn test_yearly_subscription() {
        let pricing = parse("Pro plan: $120 per year").unwrap();
        assert_eq!(pricing.amount, Some(120.0));
        assert_eq!(pricing.interval, Some(BillingInterval::Yearly));
    }

    #[test]
    fn test_free_listing() {
        let pricing = parse("This template is FREE to download").unwrap();
        assert_eq!(pricing.amount, Some(0.0));
        assert_eq!(pricing.kind, PricingKind::Free);
        assert!(pricing.currency.is_none());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let pricing = parse("Basic $9.99, Pro $29.99, Team $99.99").unwrap();
        assert_eq!(pricing.amount, Some(9.99));

        let free_first = parse("Free tier available, Pro is $29.99").unwrap();
        assert_eq!(free_first.kind, PricingKind::Free);

        let amount_first = parse("$29.99, or try the free tier").unwrap();
        assert_eq!(amount_first.amount, Some(29.99));
        assert_eq!(amount_first.kind, PricingKind::OneTime);
    }

    #[test]
    fn test_thousands_and_decimal_separators() {
        assert_eq!(parse("$1,299.99").unwrap().amount, Some(1299.99));
        assert_eq!(parse("1.299,99 €").unwrap().amount, Some(1299.99));
        assert_eq!(parse("$1,299").unwrap().amount, Some(1299.0));
        assert_eq!(parse("¥1500").unwrap().amount, Some(1500.0));
    }

    #[test]
    fn test_iso_code_adjacency_both_sides() {
        let before = parse("USD 49").unwrap();
        assert_eq!(before.amount, Some(49.0));
        assert_eq!(before.currency.as_deref(), Some("USD"));

        let after = parse("49.99 GBP").unwrap();
        assert_eq!(after.amount, Some(49.99));
        assert_eq!(after.currency.as_deref(), Some("GBP"));
    }

    #[test]
    fn test_interval_marker_outside_window_is_ignored() {
        let filler = "x".repeat(INTERVAL_WINDOW + 10);
        let text = format!("$29.99 {filler} per month");
        let pricing = parse(&text).unwrap();
        assert_eq!(pricing.kind, PricingKind::OneTime);
    }

    #[test]
    fn test_no_price_found() {
        assert!(parse("A lovely hand-drawn icon set").is_none());
        assert!(parse("").is_none());
    }

    proptest! {
        #[test]
        fn prop_symbol_prices_round_trip(whole in 0u32..100_000u32, cents in 0u32..100u32) {
            let text = format!("Get it for ${whole}.{cents:02} today");
            let pricing = parse(&text).unwrap();
            let expected = f64::from(whole) + f64::from(cents) / 100.0;
            prop_assert!((pricing.amount.unwrap() - expected).abs() < 1e-6);
            prop_assert_eq!(pricing.currency.as_deref(), Some("USD"));
        }

        #[test]
        fn prop_plain_prose_yields_nothing(text in "[a-eg-zA-EG-Z ]{0,60}") {
            // No digits and no way to spell "free" without an 'f'
            prop_assert!(parse(&text).is_none());
        }
    }
}
