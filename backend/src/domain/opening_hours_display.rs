//! Ordering and human-readable formatting of opening hours.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{DayKey, DaySchedule, OpeningHours, TimeRange};

/// Language used for weekday names and status words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLocale {
    En,
    #[default]
    De,
}

impl DisplayLocale {
    const fn closed_word(self) -> &'static str {
        match self {
            Self::En => "Closed",
            Self::De => "Geschlossen",
        }
    }

    const fn not_set_words(self) -> &'static str {
        match self {
            Self::En => "Hours not set",
            Self::De => "Keine Zeiten angegeben",
        }
    }
}

/// Error returned for an unsupported locale code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported display locale '{0}'; expected en|de")]
pub struct DisplayLocaleError(pub String);

impl FromStr for DisplayLocale {
    type Err = DisplayLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            _ => Err(DisplayLocaleError(s.to_owned())),
        }
    }
}

/// What a formatted day says about opening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoursStatus {
    Closed,
    Open(Vec<TimeRange>),
    /// Open, but no times recorded.
    NotSet,
}

/// One display line of the opening-hours table.
///
/// `Display` renders `"<label>: <status>"`, e.g. `"Dienstag: 11:30-14:00 &
/// 17:00-22:00"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedHours {
    day: DayKey,
    label: String,
    status: HoursStatus,
    locale: DisplayLocale,
}

impl FormattedHours {
    /// The day the line describes.
    pub fn day(&self) -> &DayKey {
        &self.day
    }

    /// Resolved display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Opening status.
    pub fn status(&self) -> &HoursStatus {
        &self.status
    }

    /// The status part of the line, without the label.
    pub fn status_text(&self) -> String {
        match &self.status {
            HoursStatus::Closed => self.locale.closed_word().to_owned(),
            HoursStatus::NotSet => self.locale.not_set_words().to_owned(),
            HoursStatus::Open(ranges) => ranges
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" & "),
        }
    }
}

impl fmt::Display for FormattedHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.status_text())
    }
}

/// Sort records Monday through Sunday.
///
/// Unrecognised day identifiers go after every known day, ordered by
/// identifier; the sort is stable so duplicates keep their input order.
pub fn order_for_display(mut records: Vec<OpeningHours>) -> Vec<OpeningHours> {
    records.sort_by(|a, b| sort_key(a.day()).cmp(&sort_key(b.day())));
    records
}

fn sort_key(day: &DayKey) -> (u8, &str) {
    match day {
        DayKey::Known(weekday) => (weekday.rank(), ""),
        DayKey::Unrecognised(raw) => (u8::MAX, raw.as_str()),
    }
}

/// Format one record.
///
/// # Examples
/// ```
/// use menuboard::domain::{
///     format_day, ClockTime, DaySchedule, DisplayLocale, OpeningHours, TimeRange, Weekday,
/// };
///
/// let range = TimeRange::new(
///     ClockTime::parse("11:30").unwrap(),
///     ClockTime::parse("14:30").unwrap(),
/// )
/// .unwrap();
/// let record = OpeningHours::new(
///     Weekday::Tuesday,
///     None,
///     DaySchedule::Open { primary: range, secondary: None },
/// );
/// assert_eq!(
///     format_day(&record, DisplayLocale::En).to_string(),
///     "Tuesday: 11:30-14:30"
/// );
/// ```
pub fn format_day(record: &OpeningHours, locale: DisplayLocale) -> FormattedHours {
    let label = match (record.label(), record.day()) {
        (Some(label), _) => label.to_owned(),
        (None, DayKey::Known(weekday)) => match locale {
            DisplayLocale::En => weekday.english_name().to_owned(),
            DisplayLocale::De => weekday.german_name().to_owned(),
        },
        (None, DayKey::Unrecognised(raw)) => raw.clone(),
    };
    let status = match record.schedule() {
        DaySchedule::Closed => HoursStatus::Closed,
        DaySchedule::Unset => HoursStatus::NotSet,
        schedule @ DaySchedule::Open { .. } => HoursStatus::Open(schedule.ranges()),
    };
    FormattedHours {
        day: record.day().clone(),
        label,
        status,
        locale,
    }
}

/// Order and format a set of records.
pub fn format_week(records: Vec<OpeningHours>, locale: DisplayLocale) -> Vec<FormattedHours> {
    order_for_display(records)
        .iter()
        .map(|record| format_day(record, locale))
        .collect()
}
