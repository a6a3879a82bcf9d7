//! Card entry contents and the payment-method reference produced by tokenization.
//!
//! The card input mirrors what an embedded card widget collects: number, expiry and CVC,
//! without a postal code. Validation here is the client-side pass the widget performs before
//! anything is sent to the payment processor.

use crate::error::PaymentError;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::fmt;

/// Raw card entry fields, exactly as typed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardInput {
    pub number: String,
    pub exp_month: String,
    pub exp_year: String,
    pub cvc: String,
}

// Never print the full number or the CVC.
impl fmt::Debug for CardInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardInput")
            .field("last4", &last4(&digits_only(&self.number)))
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("cvc", &"***")
            .finish()
    }
}

/// Card details that passed client-side validation.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedCard {
    pub number: String,
    pub exp_month: u32,
    pub exp_year: i32,
    pub cvc: String,
}

impl ValidatedCard {
    pub fn last4(&self) -> String {
        last4(&self.number)
    }
}

impl fmt::Debug for ValidatedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCard")
            .field("last4", &self.last4())
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .finish_non_exhaustive()
    }
}

impl CardInput {
    /// Validates the entry against `today`. Spaces and dashes in the number are ignored,
    /// two-digit years are read as 20xx.
    pub fn validate(&self, today: NaiveDate) -> Result<ValidatedCard, PaymentError> {
        let number = digits_only(&self.number);
        if number.is_empty() {
            return Err(PaymentError::Invalid("Your card number is incomplete.".into()));
        }
        if self.number.chars().any(|c| !(c.is_ascii_digit() || c == ' ' || c == '-')) {
            return Err(PaymentError::Invalid("Your card number is invalid.".into()));
        }
        if !(12..=19).contains(&number.len()) || !luhn_valid(&number) {
            return Err(PaymentError::Invalid("Your card number is invalid.".into()));
        }

        let exp_month: u32 = self
            .exp_month
            .trim()
            .parse()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| PaymentError::Invalid("Your card's expiration month is invalid.".into()))?;

        let exp_year = parse_year(self.exp_year.trim())
            .ok_or_else(|| PaymentError::Invalid("Your card's expiration year is invalid.".into()))?;

        if (exp_year, exp_month) < (today.year(), today.month()) {
            return Err(PaymentError::Invalid("Your card's expiration date is in the past.".into()));
        }

        let cvc = self.cvc.trim();
        if !(3..=4).contains(&cvc.len()) || !cvc.chars().all(|c| c.is_ascii_digit()) {
            return Err(PaymentError::Invalid("Your card's security code is incomplete.".into()));
        }

        Ok(ValidatedCard {
            number,
            exp_month,
            exp_year,
            cvc: cvc.to_string(),
        })
    }
}

/// Opaque reference to a tokenized card, as returned by the payment processor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: String,
    pub brand: String,
    pub last4: String,
    pub exp_month: u32,
    pub exp_year: i32,
    pub created: DateTime<Utc>,
}

fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn last4(digits: &str) -> String {
    let start = digits.len().saturating_sub(4);
    digits[start..].to_string()
}

fn parse_year(s: &str) -> Option<i32> {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match s.len() {
        2 => s.parse::<i32>().ok().map(|y| 2000 + y),
        4 => s.parse().ok(),
        _ => None,
    }
}

/// Luhn mod-10 checksum over an all-digit string.
pub fn luhn_valid(digits: &str) -> bool {
    let mut sum = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut d) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    sum % 10 == 0
}
