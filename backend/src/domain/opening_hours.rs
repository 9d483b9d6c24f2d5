//! Opening-hours records and the per-day schedule model.
//!
//! A day is either closed, open with one or two time windows, or explicitly
//! "not set". The enum makes the closed-implies-no-times invariant
//! unrepresentable rather than checked.

use std::fmt;

use super::{ClockTime, DayKey, Weekday};

/// Reason a pair of times cannot form a [`TimeRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("closing time must be after opening time")]
pub struct TimeRangeError;

/// One opening window. `close` is strictly after `open`; windows never wrap
/// past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    open: ClockTime,
    close: ClockTime,
}

impl TimeRange {
    /// Build a window, rejecting `close <= open`.
    pub fn new(open: ClockTime, close: ClockTime) -> Result<Self, TimeRangeError> {
        if close <= open {
            return Err(TimeRangeError);
        }
        Ok(Self { open, close })
    }

    /// Opening time.
    #[must_use]
    pub const fn open(self) -> ClockTime {
        self.open
    }

    /// Closing time.
    #[must_use]
    pub const fn close(self) -> ClockTime {
        self.close
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.open, self.close)
    }
}

/// Schedule for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySchedule {
    /// Closed all day.
    Closed,
    /// Open, but no times have been recorded.
    Unset,
    /// Open with a primary window and an optional second (split-shift) window.
    Open {
        primary: TimeRange,
        secondary: Option<TimeRange>,
    },
}

impl DaySchedule {
    /// `true` for [`DaySchedule::Closed`].
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Windows in the order they occur on the day.
    #[must_use]
    pub fn ranges(&self) -> Vec<TimeRange> {
        match self {
            Self::Closed | Self::Unset => Vec::new(),
            Self::Open { primary, secondary } => {
                std::iter::once(*primary).chain(*secondary).collect()
            }
        }
    }

    /// Flatten into the four optional storage columns.
    #[must_use]
    pub fn stored_times(&self) -> StoredTimes {
        match self {
            Self::Closed | Self::Unset => StoredTimes::default(),
            Self::Open { primary, secondary } => StoredTimes {
                open_time: Some(primary.open().to_string()),
                close_time: Some(primary.close().to_string()),
                open_time_2: secondary.map(|range| range.open().to_string()),
                close_time_2: secondary.map(|range| range.close().to_string()),
            },
        }
    }

    /// Rebuild a schedule from stored columns.
    ///
    /// A closed flag wins over any leftover times. Returns `None` when an
    /// open day's stored times do not form valid windows; callers decide how
    /// to surface such rows.
    #[must_use]
    pub fn from_stored(closed: bool, times: &StoredTimes) -> Option<Self> {
        if closed {
            return Some(Self::Closed);
        }
        let parse = |raw: &Option<String>| raw.as_deref().map(ClockTime::parse);
        match (
            parse(&times.open_time),
            parse(&times.close_time),
            parse(&times.open_time_2),
            parse(&times.close_time_2),
        ) {
            (None, None, None, None) => Some(Self::Unset),
            (Some(Ok(open)), Some(Ok(close)), second_open, second_close) => {
                let primary = TimeRange::new(open, close).ok()?;
                let secondary = match (second_open, second_close) {
                    (None, None) => None,
                    (Some(Ok(open)), Some(Ok(close))) => Some(TimeRange::new(open, close).ok()?),
                    _ => return None,
                };
                Some(Self::Open { primary, secondary })
            }
            _ => None,
        }
    }
}

/// Storage representation of a schedule's time columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTimes {
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub open_time_2: Option<String>,
    pub close_time_2: Option<String>,
}

/// Opening-hours record for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningHours {
    day: DayKey,
    label: Option<String>,
    schedule: DaySchedule,
}

impl OpeningHours {
    /// Assemble a record.
    pub fn new(day: impl Into<DayKey>, label: Option<String>, schedule: DaySchedule) -> Self {
        Self {
            day: day.into(),
            label,
            schedule,
        }
    }

    /// The record's day identity.
    pub fn day(&self) -> &DayKey {
        &self.day
    }

    /// The weekday when the stored identifier is recognised.
    pub fn weekday(&self) -> Option<Weekday> {
        self.day.weekday()
    }

    /// Optional custom display label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The day's schedule.
    pub fn schedule(&self) -> &DaySchedule {
        &self.schedule
    }

    /// Replace the schedule and label, keeping the day identity.
    #[must_use]
    pub fn with_changes(self, schedule: DaySchedule, label: Option<String>) -> Self {
        Self {
            day: self.day,
            label,
            schedule,
        }
    }
}

/// Schedule assigned to days that have no stored row yet: Monday is the rest
/// day; every other day runs a lunch and a dinner service.
#[must_use]
pub fn default_schedule(day: Weekday) -> DaySchedule {
    const LUNCH: (u8, u8, u8, u8) = (11, 30, 14, 0);
    const DINNER: (u8, u8, u8, u8) = (17, 0, 22, 0);

    if day == Weekday::Monday {
        return DaySchedule::Closed;
    }
    match (window(LUNCH), window(DINNER)) {
        (Some(primary), Some(secondary)) => DaySchedule::Open {
            primary,
            secondary: Some(secondary),
        },
        _ => DaySchedule::Unset,
    }
}

fn window((open_h, open_m, close_h, close_m): (u8, u8, u8, u8)) -> Option<TimeRange> {
    let open = ClockTime::from_hm(open_h, open_m)?;
    let close = ClockTime::from_hm(close_h, close_m)?;
    TimeRange::new(open, close).ok()
}
