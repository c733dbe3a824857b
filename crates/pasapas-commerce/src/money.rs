//! Money type and storefront price parsing.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Catalog prices arrive
//! as display strings ("129,99 €", "100€") and go through [`parse_price`]
//! before any arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

/// Currency of catalog prices. The storefront only sells in euros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol, written after the amount.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use pasapas_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::EUR);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Parse a catalog price string such as `"129,99 €"`.
    ///
    /// Returns `None` when the string carries no number.
    pub fn from_price_str(raw: &str, currency: Currency) -> Option<Self> {
        parse_price(raw).map(|amount| Self::from_decimal(amount, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "49.99 €").
    pub fn display(&self) -> String {
        format!("{} {}", self.display_amount(), self.currency.symbol())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Try to add another Money value, returning None if the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Try to multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Sum an iterator of Money values, returning None on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl Add for Money {
    type Output = Option<Money>;

    fn add(self, other: Money) -> Option<Money> {
        self.try_add(&other)
    }
}

impl Mul<i64> for Money {
    type Output = Option<Money>;

    fn mul(self, factor: i64) -> Option<Money> {
        self.try_multiply(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Parse a price string into a number.
///
/// Every character other than digits, `,`, `.` and `-` is dropped, commas
/// become decimal points, and the longest leading decimal literal is read.
/// `"1 299,90 €"` gives `1299.9`; `"1.299,90"` gives `1.299` because the
/// second point ends the literal.
pub fn parse_price(raw: &str) -> Option<f64> {
    let sanitized: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    leading_decimal(&sanitized)
}

fn leading_decimal(s: &str) -> Option<f64> {
    let mut end = usize::from(s.starts_with('-'));
    let mut digits = 0;
    let mut seen_point = false;

    for c in s[end..].chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }

    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::EUR);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::EUR).display(), "49.99 \u{20ac}");
        assert_eq!(Money::zero(Currency::EUR).to_string(), "0.00 \u{20ac}");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::EUR);
        let b = Money::new(500, Currency::EUR);
        assert_eq!((a + b).unwrap().amount_cents, 1500);
    }

    #[test]
    fn test_money_addition_overflow() {
        let a = Money::new(i64::MAX, Currency::EUR);
        let b = Money::new(1, Currency::EUR);
        assert!((a + b).is_none());
    }

    #[test]
    fn test_money_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::EUR);
        assert!(m.try_multiply(2).is_none());
    }

    #[test]
    fn test_parse_price_formats() {
        assert_eq!(parse_price("100\u{20ac}"), Some(100.0));
        assert_eq!(parse_price("129,99 \u{20ac}"), Some(129.99));
        assert_eq!(parse_price("  89.5 EUR"), Some(89.5));
        assert_eq!(parse_price("1 299,90"), Some(1299.9));
        assert_eq!(parse_price("-12"), Some(-12.0));
    }

    #[test]
    fn test_parse_price_stops_at_second_separator() {
        assert_eq!(parse_price("1.299,90"), Some(1.299));
        assert_eq!(parse_price("5-3"), Some(5.0));
    }

    #[test]
    fn test_parse_price_rejects_non_numbers() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("gratuit"), None);
        assert_eq!(parse_price("--5"), None);
        assert_eq!(parse_price("."), None);
    }

    #[test]
    fn test_money_from_price_str() {
        let m = Money::from_price_str("150\u{20ac}", Currency::EUR).unwrap();
        assert_eq!(m.amount_cents, 15000);
        assert!(Money::from_price_str("n/a", Currency::EUR).is_none());
    }

    #[test]
    fn test_currency_defaults_to_euro() {
        assert_eq!(Currency::default(), Currency::EUR);
        assert_eq!(Currency::default().to_string(), "EUR");
    }
}
