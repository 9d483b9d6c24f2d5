//! Wall-clock time of day in strict `HH:MM` 24-hour notation.

use std::fmt;
use std::str::FromStr;

/// Error raised when a time string is not strict `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("time must be HH:MM (24-hour), got '{value}'")]
pub struct ClockTimeError {
    /// The rejected input.
    pub value: String,
}

/// A minute-precision time of day between `00:00` and `23:59`.
///
/// Ordering compares the time of day, so `close > open` checks read
/// naturally.
///
/// # Examples
/// ```
/// use menuboard::domain::ClockTime;
///
/// let open = ClockTime::parse("11:30").unwrap();
/// let close = ClockTime::parse("14:30").unwrap();
/// assert!(close > open);
/// assert_eq!(open.to_string(), "11:30");
/// assert!(ClockTime::parse("9:30").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Parse a strict `HH:MM` string: exactly two digits each, hours 00–23,
    /// minutes 00–59.
    pub fn parse(raw: &str) -> Result<Self, ClockTimeError> {
        let malformed = || ClockTimeError {
            value: raw.to_owned(),
        };
        let (hour, minute) = raw.split_once(':').ok_or_else(malformed)?;
        let hour = two_digits(hour).filter(|h| *h < 24).ok_or_else(malformed)?;
        let minute = two_digits(minute)
            .filter(|m| *m < 60)
            .ok_or_else(malformed)?;
        Ok(Self { hour, minute })
    }

    /// Build a time from its components, `None` when out of range.
    #[must_use]
    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Hour component, 0–23.
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Minute component, 0–59.
    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }
}

fn two_digits(part: &str) -> Option<u8> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("00:00", 0, 0)]
    #[case("09:05", 9, 5)]
    #[case("23:59", 23, 59)]
    fn parses_valid_times(#[case] raw: &str, #[case] hour: u8, #[case] minute: u8) {
        let time = ClockTime::parse(raw).expect("valid time");
        assert_eq!((time.hour(), time.minute()), (hour, minute));
        assert_eq!(time.to_string(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("24:00")]
    #[case("12:60")]
    #[case("9:30")]
    #[case("09:5")]
    #[case("0930")]
    #[case("09:30:00")]
    #[case("+9:30")]
    #[case("ab:cd")]
    #[case(" 09:30")]
    fn rejects_malformed_times(#[case] raw: &str) {
        let err = ClockTime::parse(raw).expect_err("malformed time");
        assert_eq!(err.value, raw);
    }

    #[rstest]
    fn orders_by_time_of_day() {
        let early = ClockTime::parse("08:45").expect("valid");
        let late = ClockTime::parse("17:00").expect("valid");
        assert!(early < late);
    }
}
