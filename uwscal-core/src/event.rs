//! Event records.
//!
//! [`RawEvent`] is the wire shape from the site's JSON data, where times are
//! strings and may be missing. [`Event`] is the normalized form the rest of
//! the crate works with.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{CalError, CalResult};
use crate::list::attendance_percentage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EventId)
    }
}

/// A scheduled community activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub category: Category,
    /// Local wall-clock start time
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_attendees: Option<u32>,
    /// Organizer contact, usually an email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl Event {
    /// The calendar day the event starts on.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.day() == date
    }

    /// Percentage of capacity taken, or `None` when the event has no
    /// positive capacity. Over-capacity events report more than 100.
    pub fn attendance_percentage(&self) -> Option<u64> {
        let max = self.max_attendees?;
        attendance_percentage(self.current_attendees.unwrap_or(0), max)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// An event record as it arrives from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_category")]
    pub category: Category,
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub max_attendees: Option<u32>,
    pub current_attendees: Option<u32>,
    pub contact: Option<String>,
}

fn default_category() -> Category {
    Category::Other(String::new())
}

impl TryFrom<RawEvent> for Event {
    type Error = CalError;

    fn try_from(raw: RawEvent) -> CalResult<Self> {
        let id = raw.id;
        let start = required_time(id, "start", raw.start.as_deref())?;
        let end = required_time(id, "end", raw.end.as_deref())?;

        if end < start {
            return Err(CalError::data_format(
                Some(id),
                format!("event {id} ends ({end}) before it starts ({start})"),
            ));
        }

        Ok(Event {
            id,
            title: raw.title,
            category: raw.category,
            start,
            end,
            location: raw.location,
            description: raw.description,
            max_attendees: raw.max_attendees,
            current_attendees: raw.current_attendees,
            contact: raw.contact,
        })
    }
}

fn required_time(id: EventId, field: &str, value: Option<&str>) -> CalResult<NaiveDateTime> {
    let value = value.ok_or_else(|| {
        CalError::data_format(Some(id), format!("event {id} is missing '{field}'"))
    })?;

    parse_event_time(value).ok_or_else(|| {
        CalError::data_format(
            Some(id),
            format!("event {id} has an unreadable '{field}': {value:?}"),
        )
    })
}

/// Parse the time formats found in event data:
/// - `2024-03-10T09:00` and `2024-03-10T09:00:00(.fff)`
/// - `2024-03-10 09:00`
/// - RFC 3339 with an offset (kept as the wall-clock time it names)
/// - bare `2024-03-10`, taken as midnight
pub fn parse_event_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
