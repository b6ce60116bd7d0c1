//! Validated contact field types.
//!
//! Each field is a thin newtype around its raw representation; the only way
//! to obtain one is through `parse`, so a value held by a [`Contact`] is
//! known-valid. All four serialize transparently, which keeps the snapshot
//! format flat.
//!
//! [`Contact`]: crate::model::Contact

use crate::error::{MinderError, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9-.]+$").expect("valid email regex")
});

pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

/// A phone number: exactly 10 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if !PHONE_RE.is_match(value) {
            return Err(MinderError::Validation(
                "Phone number must be 10 digits".to_string(),
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An email address of the `local@domain` shape, domain containing a dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if !EMAIL_RE.is_match(value) {
            return Err(MinderError::Validation(
                "Invalid email format. Expected format: example@domain.com".to_string(),
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A birthday, parsed from `DD.MM.YYYY` and never in the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// `today` is passed in rather than read from the clock so validation
    /// stays deterministic under test.
    pub fn parse(value: &str, today: NaiveDate) -> Result<Self> {
        let date = NaiveDate::parse_from_str(value.trim(), BIRTHDAY_FORMAT).map_err(|_| {
            MinderError::Validation("Invalid date format. Use DD.MM.YYYY".to_string())
        })?;
        if date > today {
            return Err(MinderError::Validation(
                "Birthday date cannot be in the future".to_string(),
            ));
        }
        Ok(Self(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BIRTHDAY_FORMAT))
    }
}

/// A free-text address; any non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(MinderError::Validation(
                "Address cannot be empty".to_string(),
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn phone_accepts_ten_digits() {
        assert_eq!(Phone::parse("0501234567").unwrap().as_str(), "0501234567");
    }

    #[test]
    fn phone_rejects_short_and_non_digit() {
        assert!(Phone::parse("12345").is_err());
        assert!(Phone::parse("05012345ab").is_err());
        assert!(Phone::parse("+380501234").is_err());
    }

    #[test]
    fn email_requires_domain_dot() {
        assert!(Email::parse("alice@example.com").is_ok());
        assert!(Email::parse("alice@localhost").is_err());
        assert!(Email::parse("not-an-email").is_err());
    }

    #[test]
    fn birthday_parses_dotted_format() {
        let b = Birthday::parse("24.02.1990", today()).unwrap();
        assert_eq!(b.date(), NaiveDate::from_ymd_opt(1990, 2, 24).unwrap());
        assert_eq!(b.to_string(), "24.02.1990");
    }

    #[test]
    fn birthday_rejects_malformed_and_future() {
        assert!(Birthday::parse("1990-02-24", today()).is_err());
        assert!(Birthday::parse("31.02.1990", today()).is_err());
        assert!(Birthday::parse("01.01.2031", today()).is_err());
    }

    #[test]
    fn address_rejects_blank() {
        assert!(Address::parse("   ").is_err());
        assert_eq!(
            Address::parse(" 12 Main St ").unwrap().as_str(),
            "12 Main St"
        );
    }
}
