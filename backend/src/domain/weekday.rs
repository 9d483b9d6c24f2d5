//! Weekday identity for opening hours.
//!
//! Stored rows carry a free-form day identifier. [`DayKey`] parses it into a
//! canonical [`Weekday`] when possible and keeps unrecognised identifiers
//! around so they can still be displayed instead of failing the page.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Day of the week, declared in canonical Monday-first order.
///
/// The derived `Ord` follows declaration order, so sorting weekdays yields
/// Monday through Sunday.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Every weekday in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Zero-based position in the week, Monday first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    /// Canonical storage identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// English display name.
    #[must_use]
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// German display name.
    #[must_use]
    pub const fn german_name(self) -> &'static str {
        match self {
            Self::Monday => "Montag",
            Self::Tuesday => "Dienstag",
            Self::Wednesday => "Mittwoch",
            Self::Thursday => "Donnerstag",
            Self::Friday => "Freitag",
            Self::Saturday => "Samstag",
            Self::Sunday => "Sonntag",
        }
    }

    /// Parse an English or German day name or a three-letter abbreviation,
    /// ignoring case and surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use menuboard::domain::Weekday;
    ///
    /// assert_eq!(Weekday::parse("Dienstag"), Some(Weekday::Tuesday));
    /// assert_eq!(Weekday::parse(" SUN "), Some(Weekday::Sunday));
    /// assert_eq!(Weekday::parse("Funday"), None);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalised = raw.trim().to_lowercase();
        Self::ALL.into_iter().find(|day| {
            normalised == day.as_str()
                || normalised == day.german_name().to_lowercase()
                || day.as_str().get(..3) == Some(normalised.as_str())
                || day.german_name().to_lowercase().get(..2) == Some(normalised.as_str())
        })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a weekday.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weekday: {0}")]
pub struct WeekdayParseError(pub String);

impl FromStr for Weekday {
    type Err = WeekdayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| WeekdayParseError(s.to_owned()))
    }
}

/// Day identifier as found on a stored opening-hours row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DayKey {
    /// A recognised weekday.
    Known(Weekday),
    /// An identifier that names no weekday; preserved verbatim.
    Unrecognised(String),
}

impl DayKey {
    /// Classify a stored identifier.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Weekday::parse(raw).map_or_else(|| Self::Unrecognised(raw.to_owned()), Self::Known)
    }

    /// The weekday, when recognised.
    #[must_use]
    pub fn weekday(&self) -> Option<Weekday> {
        match self {
            Self::Known(day) => Some(*day),
            Self::Unrecognised(_) => None,
        }
    }

    /// Identifier suitable for storage and sorting.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(day) => day.as_str(),
            Self::Unrecognised(raw) => raw.as_str(),
        }
    }
}

impl From<Weekday> for DayKey {
    fn from(value: Weekday) -> Self {
        Self::Known(value)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
