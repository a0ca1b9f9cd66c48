//! Trading date type.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The day a closing price was observed.
///
/// Wraps `chrono::NaiveDate`: price rows are keyed by calendar day, never by
/// timestamp. Serializes as `YYYY-MM-DD`.
///
/// # Example
///
/// ```rust
/// use vantage_core::Date;
///
/// let date = Date::parse("2024-06-14").unwrap();
/// assert_eq!(date.next_trading_day(), Date::from_ymd(2024, 6, 17).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Builds a date from its calendar fields.
    ///
    /// # Errors
    ///
    /// `InvalidDate` for a day that does not exist (e.g. February 30).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses `YYYY-MM-DD`, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// `InvalidDate` for any other layout or a non-existent day.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| CoreError::invalid_date(format!("expected YYYY-MM-DD, got '{s}'")))
    }

    /// Shifts by whole calendar days (negative moves backwards).
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + chrono::Duration::days(days))
    }

    /// Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// The first weekday strictly after this date.
    ///
    /// Exchange holidays are not modelled; generated calendars only skip
    /// weekends.
    #[must_use]
    pub fn next_trading_day(&self) -> Self {
        let mut date = self.add_days(1);
        while date.is_weekend() {
            date = date.add_days(1);
        }
        date
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_impossible_days() {
        assert!(Date::from_ymd(2023, 2, 29).is_err());
        assert!(Date::from_ymd(2024, 2, 29).is_ok());
        assert!(Date::from_ymd(2024, 0, 10).is_err());
    }

    #[test]
    fn test_parse_layouts() {
        let date: Date = "2020-01-02".parse().unwrap();
        assert_eq!(date.to_string(), "2020-01-02");
        assert_eq!(Date::parse(" 2020-01-02 ").unwrap(), date);

        for bad in ["2020/01/02", "02-01-2020", "20200102", ""] {
            let err = Date::parse(bad).unwrap_err();
            assert!(matches!(err, CoreError::InvalidDate { .. }), "{bad}");
        }
    }

    #[test]
    fn test_next_trading_day_skips_weekend() {
        // Friday to Monday, then Monday to Tuesday
        let friday = Date::from_ymd(2024, 3, 8).unwrap();
        let monday = friday.next_trading_day();
        assert_eq!(monday, friday.add_days(3));
        assert_eq!(monday.next_trading_day(), monday.add_days(1));

        let saturday = friday.add_days(1);
        assert!(saturday.is_weekend());
        assert_eq!(saturday.next_trading_day(), monday);
    }

    #[test]
    fn test_ordering_and_serde() {
        let earlier = Date::from_ymd(2024, 2, 28).unwrap();
        let later = earlier.add_days(1);
        assert!(earlier < later);

        let json = serde_json::to_string(&later).unwrap();
        assert_eq!(json, "\"2024-02-29\"");
        assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), later);
    }
}
