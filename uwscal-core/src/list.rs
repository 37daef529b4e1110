//! List projections: day groups, relative day labels and attendance.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::event::Event;
use crate::grid::week_start;

/// Events that start on the same calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    pub day: NaiveDate,
    pub events: Vec<&'a Event>,
}

impl DateGroup<'_> {
    /// ISO `YYYY-MM-DD`
    pub fn key(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }

    pub fn label(&self, now: NaiveDateTime) -> DayLabel {
        DayLabel::relative(self.day, now)
    }
}

/// Group events by start day, earliest day first. Events within a day keep
/// their input order.
pub fn group_by_day<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<DateGroup<'a>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
    for event in events {
        by_day.entry(event.day()).or_default().push(event);
    }

    by_day
        .into_iter()
        .map(|(day, events)| DateGroup { day, events })
        .collect()
}

/// A titled list section, as shown under the mobile calendar.
#[derive(Debug, Clone)]
pub struct ListSection<'a> {
    pub title: String,
    pub groups: Vec<DateGroup<'a>>,
}

impl ListSection<'_> {
    /// True when there is nothing to list; the view shows a "no events" note.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.groups.iter().map(|g| g.events.len()).sum()
    }
}

/// How a day is named relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    Today,
    Tomorrow,
    /// Another day of the current Sunday-start week
    Weekday(Weekday),
    Date(NaiveDate),
}

impl DayLabel {
    pub fn relative(day: NaiveDate, now: NaiveDateTime) -> Self {
        let today = now.date();

        if day == today {
            DayLabel::Today
        } else if today.succ_opt() == Some(day) {
            DayLabel::Tomorrow
        } else if week_start(day) == week_start(today) {
            DayLabel::Weekday(day.weekday())
        } else {
            DayLabel::Date(day)
        }
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayLabel::Today => f.write_str("Today"),
            DayLabel::Tomorrow => f.write_str("Tomorrow"),
            DayLabel::Weekday(weekday) => f.write_str(weekday_name(*weekday)),
            DayLabel::Date(date) => f.write_str(&long_date(*date)),
        }
    }
}

/// `round(current / max * 100)`, or `None` when `max` is zero. Values over
/// 100 are passed through for over-capacity events.
pub fn attendance_percentage(current: u32, max: u32) -> Option<u64> {
    if max == 0 {
        return None;
    }
    let (current, max) = (u64::from(current), u64::from(max));
    // Half rounds up.
    Some((current * 100 + max / 2) / max)
}

/// "9:00 AM"
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// "9:00 AM - 10:30 AM"
pub fn time_range_label(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", format_time(start.time()), format_time(end.time()))
}

/// "March 10th, 2024"
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// "Mar 10th"
pub fn short_date(date: NaiveDate) -> String {
    format!("{} {}{}", date.format("%b"), date.day(), ordinal_suffix(date.day()))
}

fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
