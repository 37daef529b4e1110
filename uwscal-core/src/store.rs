//! In-memory event collection and the queries run against it.
//!
//! The query functions at the bottom of this module work on any sequence of
//! event references, so they compose: the coordinator narrows the store by
//! category first and then runs `upcoming` or `on_date` over the result.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::category::Category;
use crate::error::{CalError, CalResult};
use crate::event::{Event, EventId, RawEvent};

/// The authoritative list of events for a session, in source order.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

/// Records that were dropped while loading.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub dropped: Vec<CalError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

impl EventStore {
    pub fn new(events: Vec<Event>) -> Self {
        EventStore { events }
    }

    /// Normalize raw records. Malformed ones are dropped and reported; the
    /// rest are kept in their original order.
    pub fn load_all(records: impl IntoIterator<Item = RawEvent>) -> (Self, LoadReport) {
        let mut events = Vec::new();
        let mut report = LoadReport::default();

        for raw in records {
            match Event::try_from(raw) {
                Ok(event) => events.push(event),
                Err(err) => {
                    tracing::warn!(error = %err, "dropping malformed event record");
                    report.dropped.push(err);
                }
            }
        }

        report.loaded = events.len();
        (EventStore { events }, report)
    }

    /// Like [`load_all`](Self::load_all), but starting from untyped JSON
    /// values so that a record with the wrong shape only costs that record.
    pub fn from_values(values: Vec<Value>) -> (Self, LoadReport) {
        let mut dropped = Vec::new();
        let records: Vec<RawEvent> = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<RawEvent>(value) {
                Ok(raw) => Some(raw),
                Err(err) => {
                    tracing::warn!(error = %err, "dropping unreadable event record");
                    dropped.push(CalError::data_format(None, err.to_string()));
                    None
                }
            })
            .collect();

        let (store, mut report) = EventStore::load_all(records);
        dropped.append(&mut report.dropped);
        report.dropped = dropped;
        (store, report)
    }

    /// Parse a JSON array of event records.
    pub fn from_json(json: &str) -> CalResult<(Self, LoadReport)> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        Ok(EventStore::from_values(values))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn find(&self, id: EventId) -> CalResult<&Event> {
        self.get(id).ok_or(CalError::NotFound(id))
    }

    pub fn by_date_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<&Event> {
        by_date_range(self.iter(), start, end)
    }

    pub fn by_categories(&self, categories: &BTreeSet<Category>) -> Vec<&Event> {
        by_categories(self.iter(), categories)
    }

    pub fn upcoming(&self, now: NaiveDateTime, limit: usize) -> Vec<&Event> {
        upcoming(self.iter(), now, limit)
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        on_date(self.iter(), date)
    }

    /// Global counters over every loaded event, regardless of filters.
    pub fn stats(&self, now: NaiveDateTime) -> CalendarStats {
        CalendarStats {
            total_events: self.events.len(),
            upcoming_count: self.events.iter().filter(|e| e.start > now).count(),
            volunteer_spots_total: self
                .events
                .iter()
                .filter(|e| e.category == Category::VolunteerOpportunity)
                .map(|e| u64::from(e.max_attendees.unwrap_or(0)))
                .sum(),
        }
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarStats {
    pub total_events: usize,
    pub upcoming_count: usize,
    /// Sum of capacities of volunteer opportunities
    pub volunteer_spots_total: u64,
}

/// Events whose start lies in `[start, end]`.
pub fn by_date_range<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<&'a Event> {
    events
        .into_iter()
        .filter(|e| e.start >= start && e.start <= end)
        .collect()
}

/// Events in any of `categories`. An empty set matches nothing.
pub fn by_categories<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    categories: &BTreeSet<Category>,
) -> Vec<&'a Event> {
    events
        .into_iter()
        .filter(|e| categories.contains(&e.category))
        .collect()
}

/// Events starting strictly after `now`, soonest first, at most `limit`.
/// Events with equal starts keep their input order.
pub fn upcoming<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    now: NaiveDateTime,
    limit: usize,
) -> Vec<&'a Event> {
    let mut future: Vec<&Event> = events.into_iter().filter(|e| e.start > now).collect();
    future.sort_by_key(|e| e.start);
    future.truncate(limit);
    future
}

/// Events whose start falls on `date`.
pub fn on_date<'a>(events: impl IntoIterator<Item = &'a Event>, date: NaiveDate) -> Vec<&'a Event> {
    events.into_iter().filter(|e| e.starts_on(date)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn event(id: u64, category: Category, start: NaiveDateTime) -> Event {
        Event {
            id: EventId(id),
            title: format!("Event {id}"),
            category,
            start,
            end: start + chrono::Duration::hours(1),
            location: None,
            description: None,
            max_attendees: None,
            current_attendees: None,
            contact: None,
        }
    }

    fn sample() -> EventStore {
        EventStore::new(vec![
            event(1, Category::Workshop, at(2024, 3, 10, 9)),
            event(2, Category::CommunityMeeting, at(2024, 3, 12, 18)),
            event(3, Category::VolunteerOpportunity, at(2024, 3, 10, 9)),
            event(4, Category::ResourceDistribution, at(2024, 3, 1, 10)),
            event(5, Category::Workshop, at(2024, 4, 2, 13)),
        ])
    }

    #[test]
    fn test_workshop_scenario() {
        let json = r#"[{"id":1,"title":"Budgeting 101","start":"2024-03-10T09:00","end":"2024-03-10T10:00","category":"workshop"}]"#;
        let (store, report) = EventStore::from_json(json).unwrap();
        assert!(report.is_clean());

        let workshops = store.by_categories(&BTreeSet::from([Category::Workshop]));
        assert_eq!(workshops.len(), 1);
        assert_eq!(workshops[0].id, EventId(1));

        let meetings = store.by_categories(&BTreeSet::from([Category::CommunityMeeting]));
        assert!(meetings.is_empty());
    }

    #[test]
    fn test_empty_category_set_matches_nothing() {
        assert!(sample().by_categories(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_malformed_records_are_dropped_not_fatal() {
        let json = r#"[
            {"id":1,"title":"Ok","category":"workshop","start":"2024-03-10T09:00","end":"2024-03-10T10:00"},
            {"id":2,"title":"No start","category":"workshop","end":"2024-03-10T10:00"},
            {"title":"No id","category":"workshop","start":"2024-03-10T09:00","end":"2024-03-10T10:00"},
            {"id":4,"title":"Also ok","category":"mystery","start":"2024-03-11","end":"2024-03-11"}
        ]"#;

        let (store, report) = EventStore::from_json(json).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(report.loaded, 2);
        assert_eq!(report.dropped.len(), 2);
        assert!(report
            .dropped
            .iter()
            .all(|e| matches!(e, CalError::DataFormat { .. })));
        assert_eq!(store.events()[1].category, Category::Other("mystery".to_string()));
    }

    #[test]
    fn test_non_array_payload_is_an_error() {
        assert!(EventStore::from_json(r#"{"events":[]}"#).is_err());
    }

    #[test]
    fn test_by_date_range_is_inclusive_on_start() {
        let store = sample();
        let hits = store.by_date_range(at(2024, 3, 10, 9), at(2024, 3, 12, 18));
        let ids: Vec<_> = hits.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_upcoming_is_sorted_strict_and_bounded() {
        let store = sample();
        let now = at(2024, 3, 1, 10);

        let next = store.upcoming(now, 3);
        let ids: Vec<_> = next.iter().map(|e| e.id.0).collect();
        // Event 4 starts exactly at `now` and is excluded; 1 and 3 tie and keep input order.
        assert_eq!(ids, vec![1, 3, 2]);

        assert!(next.iter().all(|e| e.start > now));
        assert!(next.windows(2).all(|w| w[0].start <= w[1].start));
        assert!(store.upcoming(now, 0).is_empty());
        assert!(store.upcoming(at(2030, 1, 1, 0), 10).is_empty());
    }

    #[test]
    fn test_events_on_date_is_exact_subset() {
        let store = sample();
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let ids: Vec<_> = store.events_on(day).iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(store
            .events_on(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap())
            .is_empty());
    }

    #[test]
    fn test_find_missing_id_is_not_found() {
        let store = sample();
        assert!(store.get(EventId(2)).is_some());
        assert!(matches!(store.find(EventId(99)), Err(CalError::NotFound(EventId(99)))));
    }

    #[test]
    fn test_stats_count_everything() {
        let mut events = sample().events().to_vec();
        events[2].max_attendees = Some(20);
        events.push({
            let mut e = event(6, Category::VolunteerOpportunity, at(2024, 2, 1, 9));
            e.max_attendees = Some(15);
            e
        });
        let store = EventStore::new(events);

        let stats = store.stats(at(2024, 3, 5, 0));
        assert_eq!(stats.total_events, 6);
        assert_eq!(stats.upcoming_count, 4);
        assert_eq!(stats.volunteer_spots_total, 35);
    }
}
