//! Tests for opening-hours submission normalisation.

use rstest::rstest;

use super::*;

fn open_day(open: &str, close: &str) -> DaySubmission {
    DaySubmission {
        open_time: Some(open.to_owned()),
        close_time: Some(close.to_owned()),
        ..DaySubmission::default()
    }
}

fn split_day(open: &str, close: &str, open_2: &str, close_2: &str) -> DaySubmission {
    DaySubmission {
        open_time_2: Some(open_2.to_owned()),
        close_time_2: Some(close_2.to_owned()),
        ..open_day(open, close)
    }
}

fn single_rule(submission: &OpeningHoursSubmission) -> HoursViolation {
    let violations = submission.normalise().expect_err("submission must be rejected");
    let [violation] = violations.violations() else {
        panic!("expected one violation, got {violations:?}");
    };
    violation.clone()
}

#[rstest]
fn closed_day_discards_submitted_times() {
    let submission = OpeningHoursSubmission::partial([(
        Weekday::Monday,
        DaySubmission {
            closed: true,
            ..split_day("10:00", "09:00", "bad", "")
        },
    )]);

    let days = submission.normalise().expect("closed day is always valid");
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].schedule, DaySchedule::Closed);
    assert!(days[0].schedule.stored_times().open_time.is_none());
}

#[rstest]
fn single_window_normalises() {
    let submission =
        OpeningHoursSubmission::partial([(Weekday::Tuesday, open_day("11:30", "14:30"))]);

    let days = submission.normalise().expect("valid submission");
    let ranges: Vec<String> = days[0].schedule.ranges().iter().map(ToString::to_string).collect();
    assert_eq!(ranges, vec!["11:30-14:30"]);
}

#[rstest]
fn split_window_normalises() {
    let submission = OpeningHoursSubmission::partial([(
        Weekday::Friday,
        split_day("11:30", "14:00", "17:00", "22:00"),
    )]);

    let days = submission.normalise().expect("valid submission");
    assert_eq!(days[0].schedule.ranges().len(), 2);
}

#[rstest]
fn blank_secondary_fields_count_as_absent() {
    let submission = OpeningHoursSubmission::partial([(
        Weekday::Friday,
        split_day("11:30", "14:00", "  ", ""),
    )]);

    let days = submission.normalise().expect("blank second window is absent");
    assert_eq!(days[0].schedule.ranges().len(), 1);
}

#[rstest]
#[case(DaySubmission { close_time: Some("14:00".into()), ..DaySubmission::default() }, HoursRule::MissingPrimaryOpen)]
#[case(DaySubmission { open_time: Some("11:00".into()), close_time: Some(" ".into()), ..DaySubmission::default() }, HoursRule::MissingPrimaryClose)]
#[case(DaySubmission::default(), HoursRule::MissingPrimaryOpen)]
#[case(open_day("25:00", "14:00"), HoursRule::MalformedTime { field: TimeField::OpenTime, value: "25:00".into() })]
#[case(open_day("11:00", "2pm"), HoursRule::MalformedTime { field: TimeField::CloseTime, value: "2pm".into() })]
#[case(split_day("11:00", "14:00", "17:00", ""), HoursRule::IncompleteSecondaryPair)]
#[case(split_day("11:00", "14:00", "", "22:00"), HoursRule::IncompleteSecondaryPair)]
#[case(split_day("11:00", "14:00", "17:00", "7:00"), HoursRule::MalformedTime { field: TimeField::CloseTime2, value: "7:00".into() })]
#[case(open_day("14:30", "11:30"), HoursRule::CloseNotAfterOpen { window: Window::Primary })]
#[case(open_day("12:00", "12:00"), HoursRule::CloseNotAfterOpen { window: Window::Primary })]
#[case(split_day("11:00", "14:00", "23:00", "01:00"), HoursRule::CloseNotAfterOpen { window: Window::Secondary })]
#[case(DaySubmission { label: Some("ü".repeat(LABEL_MAX_CHARS + 1)), ..open_day("11:00", "14:00") }, HoursRule::LabelTooLong { max: LABEL_MAX_CHARS })]
#[case(DaySubmission { closed: true, label: Some("w".repeat(LABEL_MAX_CHARS + 1)), ..DaySubmission::default() }, HoursRule::LabelTooLong { max: LABEL_MAX_CHARS })]
fn invalid_day_reports_rule(#[case] day: DaySubmission, #[case] expected: HoursRule) {
    let submission = OpeningHoursSubmission::partial([(Weekday::Wednesday, day)]);

    let violation = single_rule(&submission);
    assert_eq!(violation.day, Weekday::Wednesday);
    assert_eq!(violation.rule, expected);
}

#[rstest]
fn tuesday_close_before_open_rejects_whole_batch() {
    let submission = OpeningHoursSubmission::partial([
        (Weekday::Monday, open_day("10:00", "18:00")),
        (Weekday::Tuesday, open_day("14:30", "11:30")),
        (Weekday::Wednesday, open_day("10:00", "18:00")),
    ]);

    let violations = submission.normalise().expect_err("tuesday is invalid");
    assert_eq!(violations.days(), vec![Weekday::Tuesday]);
    assert!(violations.to_string().contains("tuesday"));
}

#[rstest]
fn every_offending_day_is_reported_in_week_order() {
    let submission = OpeningHoursSubmission::partial([
        (Weekday::Sunday, open_day("", "18:00")),
        (Weekday::Monday, open_day("18:00", "10:00")),
        (Weekday::Thursday, open_day("10:00", "18:00")),
    ]);

    let violations = submission.normalise().expect_err("two invalid days");
    assert_eq!(violations.days(), vec![Weekday::Monday, Weekday::Sunday]);
}

#[rstest]
fn partial_mode_ignores_missing_days() {
    let submission =
        OpeningHoursSubmission::partial([(Weekday::Saturday, open_day("09:00", "13:00"))]);

    let days = submission.normalise().expect("partial submission");
    let weekdays: Vec<Weekday> = days.iter().map(|day| day.weekday).collect();
    assert_eq!(weekdays, vec![Weekday::Saturday]);
}

#[rstest]
fn full_replacement_requires_every_day() {
    let submission = OpeningHoursSubmission::full_replacement(
        Weekday::ALL
            .into_iter()
            .filter(|day| *day != Weekday::Thursday)
            .map(|day| (day, open_day("10:00", "18:00"))),
    );

    let violation = single_rule(&submission);
    assert_eq!(violation.day, Weekday::Thursday);
    assert_eq!(violation.rule, HoursRule::MissingDay);
}

#[rstest]
fn full_replacement_with_all_days_returns_week_in_order() {
    let submission = OpeningHoursSubmission::full_replacement(
        Weekday::ALL
            .into_iter()
            .rev()
            .map(|day| (day, open_day("10:00", "18:00"))),
    );

    let days = submission.normalise().expect("complete week");
    let weekdays: Vec<Weekday> = days.iter().map(|day| day.weekday).collect();
    assert_eq!(weekdays, Weekday::ALL.to_vec());
}

#[rstest]
#[case(None, Some("Ruhetag"), Some("Ruhetag"))]
#[case(Some("   "), Some("Ruhetag"), None)]
#[case(Some(" Brunch "), None, Some("Brunch"))]
fn label_changes_resolve_against_stored_label(
    #[case] submitted: Option<&str>,
    #[case] stored: Option<&str>,
    #[case] expected: Option<&str>,
) {
    let submission = OpeningHoursSubmission::partial([(
        Weekday::Sunday,
        DaySubmission {
            closed: true,
            label: submitted.map(str::to_owned),
            ..DaySubmission::default()
        },
    )]);

    let days = submission.normalise().expect("closed day");
    assert_eq!(days[0].label.apply(stored).as_deref(), expected);
}

#[rstest]
fn label_may_fill_its_column() {
    let label = "ü".repeat(LABEL_MAX_CHARS);
    let submission = OpeningHoursSubmission::partial([(
        Weekday::Saturday,
        DaySubmission {
            label: Some(format!("  {label}  ")),
            ..open_day("09:00", "13:00")
        },
    )]);

    let days = submission.normalise().expect("label at the limit");
    assert_eq!(days[0].label, LabelChange::Set(label));
}

#[rstest]
fn violations_serialise_with_rule_codes() {
    let submission =
        OpeningHoursSubmission::partial([(Weekday::Tuesday, open_day("14:30", "11:30"))]);
    let violations = submission.normalise().expect_err("invalid");

    let value = serde_json::to_value(violations.violations()).expect("serialise");
    assert_eq!(
        value,
        serde_json::json!([{
            "day": "tuesday",
            "rule": { "code": "close_not_after_open", "window": "primary" }
        }])
    );
}
