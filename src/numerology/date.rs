//! Birth date parsing and validation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Errors that can occur while parsing a birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Expected DD/MM/AAAA format")]
    Format,

    #[error("No such calendar date")]
    InvalidDate,
}

/// A validated calendar date in DD/MM/AAAA form.
///
/// Parsing is strict: exactly two digits for day and month, four for the
/// year, separated by slashes, and the combination must name a real
/// calendar date (so `31/02/2000` and `15/13/2000` are both rejected).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Day of month (1-31).
    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Month of year (1-12).
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Four-digit year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// The eight decimal digits of the DDMMAAAA rendering, in order.
    #[must_use]
    pub fn digits(self) -> [u32; 8] {
        let day = self.day();
        let month = self.month();
        // Parsing guarantees a four-digit year.
        let year = self.year().unsigned_abs();

        [
            day / 10,
            day % 10,
            month / 10,
            month % 10,
            year / 1000 % 10,
            year / 100 % 10,
            year / 10 % 10,
            year % 10,
        ]
    }
}

impl From<NaiveDate> for BirthDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for BirthDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '/');

        let day = parse_field(parts.next(), 2)?;
        let month = parse_field(parts.next(), 2)?;
        let year = parse_field(parts.next(), 4)?;

        let date = NaiveDate::from_ymd_opt(
            i32::try_from(year).map_err(|_| DateError::InvalidDate)?,
            month,
            day,
        )
        .ok_or(DateError::InvalidDate)?;

        Ok(Self(date))
    }
}

/// Parses one slash-separated field of exactly `len` ASCII digits.
fn parse_field(field: Option<&str>, len: usize) -> Result<u32, DateError> {
    let field = field.ok_or(DateError::Format)?;

    if field.len() != len || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::Format);
    }

    field.parse().map_err(|_| DateError::Format)
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:04}",
            self.day(),
            self.month(),
            self.year()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        let date: BirthDate = "23/08/1995".parse().unwrap();
        assert_eq!(date.day(), 23);
        assert_eq!(date.month(), 8);
        assert_eq!(date.year(), 1995);
    }

    #[test]
    fn test_parse_rejects_bad_format() {
        assert_eq!("23-08-1995".parse::<BirthDate>(), Err(DateError::Format));
        assert_eq!("5/08/1995".parse::<BirthDate>(), Err(DateError::Format));
        assert_eq!("23/08/95".parse::<BirthDate>(), Err(DateError::Format));
        assert_eq!("23/08".parse::<BirthDate>(), Err(DateError::Format));
        assert_eq!("hola".parse::<BirthDate>(), Err(DateError::Format));
        assert_eq!("".parse::<BirthDate>(), Err(DateError::Format));
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert_eq!(
            "15/13/2000".parse::<BirthDate>(),
            Err(DateError::InvalidDate)
        );
        assert_eq!(
            "31/02/2000".parse::<BirthDate>(),
            Err(DateError::InvalidDate)
        );
        assert_eq!(
            "00/01/2000".parse::<BirthDate>(),
            Err(DateError::InvalidDate)
        );
    }

    #[test]
    fn test_parse_accepts_leap_day() {
        assert!("29/02/2000".parse::<BirthDate>().is_ok());
        assert_eq!(
            "29/02/1999".parse::<BirthDate>(),
            Err(DateError::InvalidDate)
        );
    }

    #[test]
    fn test_digits() {
        let date: BirthDate = "23/08/1995".parse().unwrap();
        assert_eq!(date.digits(), [2, 3, 0, 8, 1, 9, 9, 5]);
    }

    #[test]
    fn test_display_round_trip() {
        let date: BirthDate = "05/01/2017".parse().unwrap();
        assert_eq!(date.to_string(), "05/01/2017");
    }
}
