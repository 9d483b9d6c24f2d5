//! Validation and normalisation of submitted opening hours.
//!
//! Admin forms post raw strings for every weekday. Normalisation turns them
//! into [`DaySchedule`] values or reports every offending weekday at once;
//! nothing is applied unless the whole submission passes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ClockTime, DaySchedule, TimeRange, Weekday};

/// Raw per-day values as submitted by the admin form.
///
/// Blank strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySubmission {
    /// Closed all day; submitted times are discarded.
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    #[schema(example = "11:30")]
    pub open_time: Option<String>,
    #[serde(default)]
    #[schema(example = "14:30")]
    pub close_time: Option<String>,
    #[serde(default)]
    pub open_time_2: Option<String>,
    #[serde(default)]
    pub close_time_2: Option<String>,
    /// Display label: absent keeps the stored one, blank clears it.
    #[serde(default)]
    pub label: Option<String>,
}

/// How weekdays missing from a submission are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    /// Missing weekdays keep their stored hours.
    #[default]
    Partial,
    /// Every weekday must be present.
    FullReplacement,
}

/// Which submitted field a time rule refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeField {
    OpenTime,
    CloseTime,
    OpenTime2,
    CloseTime2,
}

/// Which window of a day a rule refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    Primary,
    Secondary,
}

/// Rule a day's submission broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum HoursRule {
    /// Full replacement requires every weekday.
    MissingDay,
    /// Open day without an opening time.
    MissingPrimaryOpen,
    /// Open day without a closing time.
    MissingPrimaryClose,
    /// A time is not strict `HH:MM`.
    MalformedTime { field: TimeField, value: String },
    /// Only one half of the second window was given.
    IncompleteSecondaryPair,
    /// A window closes at or before it opens.
    CloseNotAfterOpen { window: Window },
    /// The label is wider than its column.
    LabelTooLong { max: usize },
}

impl fmt::Display for HoursRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDay => write!(f, "day missing from full replacement"),
            Self::MissingPrimaryOpen => write!(f, "opening time is required"),
            Self::MissingPrimaryClose => write!(f, "closing time is required"),
            Self::MalformedTime { field, value } => {
                write!(f, "{field:?} must be HH:MM, got '{value}'")
            }
            Self::IncompleteSecondaryPair => {
                write!(f, "second window needs both opening and closing time")
            }
            Self::CloseNotAfterOpen { window } => {
                write!(f, "{window:?} window closes at or before it opens")
            }
            Self::LabelTooLong { max } => write!(f, "label must be at most {max} characters"),
        }
    }
}

/// One weekday that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoursViolation {
    pub day: Weekday,
    pub rule: HoursRule,
}

/// Every violation found in a rejected submission, ordered Monday first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoursViolations(Vec<HoursViolation>);

impl HoursViolations {
    /// The individual violations.
    pub fn violations(&self) -> &[HoursViolation] {
        &self.0
    }

    /// Weekdays that failed, in canonical order.
    pub fn days(&self) -> Vec<Weekday> {
        self.0.iter().map(|violation| violation.day).collect()
    }
}

impl fmt::Display for HoursViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<&str> = self.0.iter().map(|v| v.day.as_str()).collect();
        write!(f, "opening hours rejected for {}", days.join(", "))
    }
}

impl std::error::Error for HoursViolations {}

/// Width of the `opening_hours.label` column, in characters.
pub const LABEL_MAX_CHARS: usize = 100;

/// Requested change to a day's display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelChange {
    Keep,
    Clear,
    Set(String),
}

impl LabelChange {
    fn from_submitted(label: Option<&str>) -> Result<Self, HoursRule> {
        match label.map(str::trim) {
            None => Ok(Self::Keep),
            Some("") => Ok(Self::Clear),
            Some(text) if text.chars().count() > LABEL_MAX_CHARS => {
                Err(HoursRule::LabelTooLong {
                    max: LABEL_MAX_CHARS,
                })
            }
            Some(text) => Ok(Self::Set(text.to_owned())),
        }
    }

    /// Resolve against the currently stored label.
    pub fn apply(&self, current: Option<&str>) -> Option<String> {
        match self {
            Self::Keep => current.map(str::to_owned),
            Self::Clear => None,
            Self::Set(text) => Some(text.clone()),
        }
    }
}

/// A validated day ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalisedDay {
    pub weekday: Weekday,
    pub schedule: DaySchedule,
    pub label: LabelChange,
}

/// A batch of per-weekday submissions.
///
/// # Examples
/// ```
/// use menuboard::domain::{DaySubmission, OpeningHoursSubmission, Weekday};
///
/// let submission = OpeningHoursSubmission::partial([(
///     Weekday::Tuesday,
///     DaySubmission {
///         open_time: Some("11:30".into()),
///         close_time: Some("14:30".into()),
///         ..DaySubmission::default()
///     },
/// )]);
/// let days = submission.normalise().expect("valid submission");
/// assert_eq!(days.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningHoursSubmission {
    mode: SubmissionMode,
    days: BTreeMap<Weekday, DaySubmission>,
}

impl OpeningHoursSubmission {
    /// Build a submission with an explicit mode.
    pub fn new(
        mode: SubmissionMode,
        days: impl IntoIterator<Item = (Weekday, DaySubmission)>,
    ) -> Self {
        Self {
            mode,
            days: days.into_iter().collect(),
        }
    }

    /// Submission that only touches the listed weekdays.
    pub fn partial(days: impl IntoIterator<Item = (Weekday, DaySubmission)>) -> Self {
        Self::new(SubmissionMode::Partial, days)
    }

    /// Submission that must list all seven weekdays.
    pub fn full_replacement(days: impl IntoIterator<Item = (Weekday, DaySubmission)>) -> Self {
        Self::new(SubmissionMode::FullReplacement, days)
    }

    /// The submission mode.
    pub fn mode(&self) -> SubmissionMode {
        self.mode
    }

    /// `true` when no weekday was submitted.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Validate every submitted day.
    ///
    /// Returns the normalised days in canonical order, or every violation.
    pub fn normalise(&self) -> Result<Vec<NormalisedDay>, HoursViolations> {
        let mut accepted = Vec::with_capacity(self.days.len());
        let mut violations = Vec::new();

        for day in Weekday::ALL {
            match self.days.get(&day) {
                Some(submitted) => match normalise_day(day, submitted) {
                    Ok(normalised) => accepted.push(normalised),
                    Err(rule) => violations.push(HoursViolation { day, rule }),
                },
                None if self.mode == SubmissionMode::FullReplacement => {
                    violations.push(HoursViolation {
                        day,
                        rule: HoursRule::MissingDay,
                    });
                }
                None => {}
            }
        }

        if violations.is_empty() {
            Ok(accepted)
        } else {
            Err(HoursViolations(violations))
        }
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

fn parse_field(field: TimeField, raw: &str) -> Result<ClockTime, HoursRule> {
    ClockTime::parse(raw).map_err(|_| HoursRule::MalformedTime {
        field,
        value: raw.to_owned(),
    })
}

fn normalise_day(weekday: Weekday, submitted: &DaySubmission) -> Result<NormalisedDay, HoursRule> {
    let label = LabelChange::from_submitted(submitted.label.as_deref())?;
    if submitted.closed {
        return Ok(NormalisedDay {
            weekday,
            schedule: DaySchedule::Closed,
            label,
        });
    }

    let open = present(submitted.open_time.as_ref()).ok_or(HoursRule::MissingPrimaryOpen)?;
    let close = present(submitted.close_time.as_ref()).ok_or(HoursRule::MissingPrimaryClose)?;
    let primary = TimeRange::new(
        parse_field(TimeField::OpenTime, open)?,
        parse_field(TimeField::CloseTime, close)?,
    )
    .map_err(|_| HoursRule::CloseNotAfterOpen {
        window: Window::Primary,
    })?;

    let secondary = match (
        present(submitted.open_time_2.as_ref()),
        present(submitted.close_time_2.as_ref()),
    ) {
        (None, None) => None,
        (Some(open), Some(close)) => Some(
            TimeRange::new(
                parse_field(TimeField::OpenTime2, open)?,
                parse_field(TimeField::CloseTime2, close)?,
            )
            .map_err(|_| HoursRule::CloseNotAfterOpen {
                window: Window::Secondary,
            })?,
        ),
        _ => return Err(HoursRule::IncompleteSecondaryPair),
    };

    Ok(NormalisedDay {
        weekday,
        schedule: DaySchedule::Open { primary, secondary },
        label,
    })
}

#[cfg(test)]
#[path = "opening_hours_submission_tests.rs"]
mod tests;
