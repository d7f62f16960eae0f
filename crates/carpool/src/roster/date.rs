//! Date keys for roster records.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Storage format of a roster date.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years that format as exactly four digits.
const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// A calendar date kept in its `YYYY-MM-DD` string form.
///
/// Only zero-padded four-digit years are accepted, so ordering the strings
/// orders the dates. The store compares these strings directly in range
/// queries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RosterDate {
    key: String,
    date: NaiveDate,
}

impl RosterDate {
    /// Parse and validate a date key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] unless `value` is a real calendar date
    /// written exactly as `YYYY-MM-DD`.
    pub fn parse(value: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map_err(|_| Error::invalid_date(value))?;
        let parsed = Self::try_from(date).map_err(|_| Error::invalid_date(value))?;
        // chrono accepts `2024-1-5`; require the canonical padded form
        if parsed.key != value {
            return Err(Error::invalid_date(value));
        }
        Ok(parsed)
    }

    /// The date as a `chrono` value.
    #[must_use]
    pub fn naive(&self) -> NaiveDate {
        self.date
    }

    /// The `YYYY-MM-DD` key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl TryFrom<NaiveDate> for RosterDate {
    type Error = Error;

    fn try_from(date: NaiveDate) -> Result<Self> {
        if !YEARS.contains(&date.year()) {
            return Err(Error::invalid_date(date.format(DATE_FORMAT).to_string()));
        }
        Ok(Self {
            key: date.format(DATE_FORMAT).to_string(),
            date,
        })
    }
}

impl FromStr for RosterDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RosterDate {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RosterDate> for String {
    fn from(date: RosterDate) -> Self {
        date.key
    }
}

impl fmt::Display for RosterDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let date = RosterDate::parse("2024-01-02").unwrap();
        assert_eq!(date.as_str(), "2024-01-02");
        assert_eq!(date.naive(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_parse_rejects_unpadded() {
        assert!(RosterDate::parse("2024-1-2").is_err());
        assert!(RosterDate::parse("2024-01-2").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "yesterday", "2024/01/02", "2024-02-30", "2024-01-02T00:00"] {
            assert!(
                matches!(RosterDate::parse(bad), Err(Error::InvalidDate { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_string_order_is_date_order() {
        let a = RosterDate::parse("2023-12-31").unwrap();
        let b = RosterDate::parse("2024-01-01").unwrap();
        let c = RosterDate::parse("2024-10-01").unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_from_naive_date() {
        let date = RosterDate::try_from(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()).unwrap();
        assert_eq!(date.to_string(), "2024-03-09");
        assert_eq!(date.naive(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn test_five_digit_years_rejected() {
        let far = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();
        assert!(matches!(
            RosterDate::try_from(far),
            Err(Error::InvalidDate { .. })
        ));
        assert!(RosterDate::parse("+10000-01-01").is_err());

        let last = RosterDate::parse("9999-12-31").unwrap();
        assert!(RosterDate::parse("2024-01-01").unwrap() < last);
    }

    #[test]
    fn test_serde_validates() {
        let date: RosterDate = serde_json::from_str("\"2024-05-06\"").unwrap();
        assert_eq!(date.as_str(), "2024-05-06");
        assert!(serde_json::from_str::<RosterDate>("\"2024-5-6\"").is_err());
    }
}
