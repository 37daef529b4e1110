//! The detail view of a single event.

use crate::category::{CategoryRegistry, CategoryStyle};
use crate::event::{Event, EventId};
use crate::list::{long_date, time_range_label};
use crate::selection::Selection;
use crate::store::EventStore;

/// What the detail panel should show for the current selection.
#[derive(Debug, Clone)]
pub enum DetailView<'a> {
    /// Nothing selected; the panel is closed.
    Hidden,
    /// The selected id is not among the loaded events.
    NotFound(EventId),
    Event(EventDetail<'a>),
}

impl<'a> DetailView<'a> {
    pub fn resolve(selection: Selection, store: &'a EventStore, registry: &'a CategoryRegistry) -> Self {
        match selection {
            Selection::NoSelection => DetailView::Hidden,
            Selection::EventSelected(id) => match store.get(id) {
                Some(event) => DetailView::Event(EventDetail::new(event, registry)),
                None => DetailView::NotFound(id),
            },
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DetailView::Hidden)
    }
}

#[derive(Debug, Clone)]
pub struct EventDetail<'a> {
    pub event: &'a Event,
    pub style: &'a CategoryStyle,
    /// "March 10th, 2024"
    pub date_label: String,
    /// "9:00 AM - 10:00 AM"
    pub time_label: String,
    /// "12 / 20 attendees", present when either count is set and non-zero
    pub capacity_label: Option<String>,
    /// Registration bar, present when capacity is positive
    pub attendance: Option<AttendanceBar>,
    pub contact_link: Option<String>,
    pub share: SharePayload,
}

impl<'a> EventDetail<'a> {
    pub fn new(event: &'a Event, registry: &'a CategoryRegistry) -> Self {
        let current = event.current_attendees.unwrap_or(0);
        let max = event.max_attendees.unwrap_or(0);

        let capacity_label = (current > 0 || max > 0).then(|| {
            let max = match event.max_attendees {
                Some(max) if max > 0 => max.to_string(),
                _ => "Unlimited".to_string(),
            };
            format!("{current} / {max} attendees")
        });

        let attendance = event.attendance_percentage().map(|percent| AttendanceBar {
            percent,
            current,
            max,
        });

        EventDetail {
            event,
            style: registry.lookup(&event.category),
            date_label: long_date(event.day()),
            time_label: time_range_label(event.start, event.end),
            capacity_label,
            attendance,
            contact_link: event.contact.as_ref().map(|c| format!("mailto:{c}")),
            share: SharePayload {
                title: event.title.clone(),
                text: event.description.clone().unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceBar {
    /// May exceed 100 for over-capacity events
    pub percent: u64,
    pub current: u32,
    pub max: u32,
}

impl AttendanceBar {
    /// "125% Full"
    pub fn headline(&self) -> String {
        format!("{}% Full", self.percent)
    }

    /// "25 of 20 spots filled"
    pub fn summary(&self) -> String {
        format!("{} of {} spots filled", self.current, self.max)
    }
}

/// Title and text handed to a share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, CategoryIcon};
    use chrono::NaiveDate;

    fn event(id: u64) -> Event {
        let start = NaiveDate::from_ymd_opt(2024, 3, 16)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Event {
            id: EventId(id),
            title: "Park Cleanup".to_string(),
            category: Category::VolunteerOpportunity,
            start,
            end: start + chrono::Duration::hours(4),
            location: Some("Riverside Park".to_string()),
            description: Some("Bring gloves".to_string()),
            max_attendees: Some(20),
            current_attendees: Some(25),
            contact: Some("volunteer@example.org".to_string()),
        }
    }

    #[test]
    fn test_over_capacity_detail() {
        let registry = CategoryRegistry::builtin();
        let store = EventStore::new(vec![event(1)]);

        let view = DetailView::resolve(Selection::EventSelected(EventId(1)), &store, &registry);
        let DetailView::Event(detail) = view else {
            panic!("Expected event detail");
        };

        assert_eq!(detail.date_label, "March 16th, 2024");
        assert_eq!(detail.time_label, "8:00 AM - 12:00 PM");
        assert_eq!(detail.capacity_label.as_deref(), Some("25 / 20 attendees"));
        let bar = detail.attendance.unwrap();
        assert_eq!(bar.percent, 125);
        assert_eq!(bar.headline(), "125% Full");
        assert_eq!(bar.summary(), "25 of 20 spots filled");
        assert_eq!(detail.contact_link.as_deref(), Some("mailto:volunteer@example.org"));
        assert_eq!(detail.style.icon, CategoryIcon::HandsHelping);
        assert_eq!(detail.share.text, "Bring gloves");
    }

    #[test]
    fn test_no_capacity_hides_attendance() {
        let registry = CategoryRegistry::builtin();
        let mut e = event(1);
        e.max_attendees = None;
        e.current_attendees = Some(4);
        e.category = Category::from_key("potluck");

        let detail = EventDetail::new(&e, &registry);
        assert_eq!(detail.capacity_label.as_deref(), Some("4 / Unlimited attendees"));
        assert!(detail.attendance.is_none());
        assert_eq!(detail.style, &CategoryStyle::fallback());

        e.current_attendees = None;
        assert!(EventDetail::new(&e, &registry).capacity_label.is_none());
    }

    #[test]
    fn test_huge_over_capacity_bar() {
        let registry = CategoryRegistry::builtin();
        let mut e = event(1);
        e.max_attendees = Some(1);
        e.current_attendees = Some(u32::MAX);

        let bar = EventDetail::new(&e, &registry).attendance.unwrap();
        assert_eq!(bar.percent, 429_496_729_500);
        assert_eq!(bar.headline(), "429496729500% Full");
    }

    #[test]
    fn test_unknown_selection_falls_back() {
        let registry = CategoryRegistry::builtin();
        let store = EventStore::new(vec![event(1)]);

        let view = DetailView::resolve(Selection::EventSelected(EventId(42)), &store, &registry);
        assert!(matches!(view, DetailView::NotFound(EventId(42))));
        assert!(view.is_open());

        let hidden = DetailView::resolve(Selection::NoSelection, &store, &registry);
        assert!(!hidden.is_open());
    }
}
