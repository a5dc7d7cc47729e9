// client/src/models/price.rs

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// An amount in minor units (cents).
///
/// The backend sends prices either as JSON numbers (`100`, `99.5`) or as
/// decimal strings (`"100.00"`); both parse into the same value.
///
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
  pub const ZERO: Price = Price(0);

  pub fn from_cents(cents: i64) -> Self {
    Price(cents)
  }

  pub fn from_units(units: i64) -> Self {
    Price(units.saturating_mul(100))
  }

  pub fn cents(self) -> i64 {
    self.0
  }

  /// Parses `"250"`, `"250.5"` or `"250.50"`. More than two decimals are rounded half-up.
  pub fn parse_decimal(s: &str) -> Option<Self> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
      Some(rest) => (true, rest),
      None => (false, s),
    };
    let (whole, frac) = match digits.split_once('.') {
      Some((w, f)) => (w, f),
      None => (digits, ""),
    };
    if whole.is_empty() && frac.is_empty() {
      return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
      return None;
    }
    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut frac_digits = frac.bytes().map(|b| i64::from(b - b'0'));
    let tenths = frac_digits.next().unwrap_or(0);
    let hundredths = frac_digits.next().unwrap_or(0);
    let round_up = frac_digits.next().map(|d| d >= 5).unwrap_or(false);
    let cents = whole
      .checked_mul(100)?
      .checked_add(tenths * 10 + hundredths + i64::from(round_up))?;
    Some(Price(if negative { -cents } else { cents }))
  }

  fn from_f64(value: f64) -> Option<Self> {
    if !value.is_finite() {
      return None;
    }
    Some(Price((value * 100.0).round() as i64))
  }
}

impl fmt::Display for Price {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sign = if self.0 < 0 { "-" } else { "" };
    let abs = self.0.unsigned_abs();
    write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
  }
}

impl Add for Price {
  type Output = Price;
  fn add(self, rhs: Price) -> Price {
    Price(self.0.saturating_add(rhs.0))
  }
}

impl Mul<u32> for Price {
  type Output = Price;
  fn mul(self, qty: u32) -> Price {
    Price(self.0.saturating_mul(i64::from(qty)))
  }
}

impl Sum for Price {
  fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
    iter.fold(Price::ZERO, Add::add)
  }
}

impl Serialize for Price {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    if self.0 % 100 == 0 {
      serializer.serialize_i64(self.0 / 100)
    } else {
      serializer.serialize_f64(self.0 as f64 / 100.0)
    }
  }
}

impl<'de> Deserialize<'de> for Price {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct PriceVisitor;

    impl<'de> Visitor<'de> for PriceVisitor {
      type Value = Price;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a price as a number or a decimal string")
      }

      fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        v.checked_mul(100).map(Price).ok_or_else(|| E::custom("price out of range"))
      }

      fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        i64::try_from(v)
          .ok()
          .and_then(|v| v.checked_mul(100))
          .map(Price)
          .ok_or_else(|| E::custom("price out of range"))
      }

      fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Price::from_f64(v).ok_or_else(|| E::custom("price is not a finite number"))
      }

      fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        Price::parse_decimal(v).ok_or_else(|| E::custom(format!("invalid price string '{}'", v)))
      }
    }

    deserializer.deserialize_any(PriceVisitor)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_numbers_and_decimal_strings() {
    let prices: Vec<Price> = serde_json::from_str(r#"[100, "100.00", 99.5, "0.05", "12"]"#).unwrap();
    assert_eq!(
      prices,
      vec![
        Price::from_cents(10_000),
        Price::from_cents(10_000),
        Price::from_cents(9_950),
        Price::from_cents(5),
        Price::from_cents(1_200),
      ]
    );
  }

  #[test]
  fn rejects_garbage_strings() {
    assert!(serde_json::from_str::<Price>(r#""abc""#).is_err());
    assert!(serde_json::from_str::<Price>(r#""1.2.3""#).is_err());
    assert!(Price::parse_decimal(".").is_none());
  }

  #[test]
  fn rounds_extra_decimals_half_up() {
    assert_eq!(Price::parse_decimal("1.005"), Some(Price::from_cents(101)));
    assert_eq!(Price::parse_decimal("1.004"), Some(Price::from_cents(100)));
  }

  #[test]
  fn arithmetic_saturates_on_huge_amounts() {
    let huge: Price = serde_json::from_str("10000000000000000").unwrap();
    assert_eq!(huge * 10, Price::from_cents(i64::MAX));
    assert_eq!(vec![huge * 10, Price::from_units(5)].into_iter().sum::<Price>(), Price::from_cents(i64::MAX));
    assert_eq!(Price::from_cents(-i64::MAX) + Price::from_cents(-10), Price::from_cents(i64::MIN));
    assert!(Price::parse_decimal("92233720368547758.99").is_none());
  }

  #[test]
  fn displays_with_two_decimals() {
    assert_eq!(Price::from_cents(25_000).to_string(), "250.00");
    assert_eq!(Price::from_cents(5).to_string(), "0.05");
    assert_eq!(Price::from_cents(-150).to_string(), "-1.50");
  }

  #[test]
  fn serializes_whole_amounts_as_integers() {
    assert_eq!(serde_json::to_string(&Price::from_units(100)).unwrap(), "100");
    assert_eq!(serde_json::to_string(&Price::from_cents(9_950)).unwrap(), "99.5");
  }
}
