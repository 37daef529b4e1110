//! Month grid computation shared by the desktop and mobile calendars.
//!
//! Weeks start on Sunday. A month grid runs from the Sunday on or before the
//! 1st to the Saturday on or after the last day, so it is always 5 or 6 full
//! rows (4 only for a 28-day February that starts on a Sunday).

use std::collections::HashMap;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::event::Event;

/// Visible event markers per cell before collapsing into "+N more".
pub const DEFAULT_INDICATOR_CAP: usize = 3;

/// One day slot in a calendar grid.
#[derive(Debug, Clone)]
pub struct GridCell<'a> {
    pub date: NaiveDate,
    /// Whether the day belongs to the month the grid was built for
    pub in_month: bool,
    pub is_today: bool,
    /// Every event starting on `date`, in input order
    pub events: Vec<&'a Event>,
}

/// The markers to draw for a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicators<'a> {
    pub shown: Vec<&'a Event>,
    /// Events not shown individually
    pub overflow: usize,
}

impl<'a> GridCell<'a> {
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Up to `cap` events plus a count of the rest. The cell keeps the full
    /// list regardless.
    pub fn indicators(&self, cap: usize) -> Indicators<'a> {
        let shown_len = self.events.len().min(cap);
        Indicators {
            shown: self.events[..shown_len].to_vec(),
            overflow: self.events.len() - shown_len,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    /// First day of the reference month
    month: NaiveDate,
    cells: Vec<GridCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// Build the grid for the month containing `reference`.
    pub fn build(
        reference: NaiveDate,
        events: impl IntoIterator<Item = &'a Event>,
        today: NaiveDate,
    ) -> Self {
        let month = first_of_month(reference);
        let grid_start = week_start(month);
        let grid_end = week_end(last_of_month(month));

        let mut by_day = bucket_by_day(events);
        let cells = days_between(grid_start, grid_end)
            .map(|date| GridCell {
                date,
                in_month: date.year() == month.year() && date.month() == month.month(),
                is_today: date == today,
                events: by_day.remove(&date).unwrap_or_default(),
            })
            .collect();

        MonthGrid { month, cells }
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    /// e.g. "March 2024"
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn cells(&self) -> &[GridCell<'a>] {
        &self.cells
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell<'a>]> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&GridCell<'a>> {
        self.cells.iter().find(|c| c.date == date)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.events.is_empty())
    }
}

/// The seven cells of the week containing `date`, for the desktop week view.
pub fn build_week<'a>(
    date: NaiveDate,
    events: impl IntoIterator<Item = &'a Event>,
    today: NaiveDate,
) -> Vec<GridCell<'a>> {
    let (start, end) = week_range(date);
    let mut by_day = bucket_by_day(events);

    days_between(start, end)
        .map(|d| GridCell {
            date: d,
            in_month: d.year() == date.year() && d.month() == date.month(),
            is_today: d == today,
            events: by_day.remove(&d).unwrap_or_default(),
        })
        .collect()
}

/// A single cell for the desktop day view.
pub fn build_day<'a>(
    date: NaiveDate,
    events: impl IntoIterator<Item = &'a Event>,
    today: NaiveDate,
) -> GridCell<'a> {
    GridCell {
        date,
        in_month: true,
        is_today: date == today,
        events: events.into_iter().filter(|e| e.starts_on(date)).collect(),
    }
}

/// Every day from `start` through `end`, inclusive of `NaiveDate::MAX`.
fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |d| d.succ_opt()).take_while(move |d| *d <= end)
}

fn bucket_by_day<'a>(events: impl IntoIterator<Item = &'a Event>) -> HashMap<NaiveDate, Vec<&'a Event>> {
    let mut by_day: HashMap<NaiveDate, Vec<&Event>> = HashMap::new();
    for event in events {
        by_day.entry(event.day()).or_default().push(event);
    }
    by_day
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// The Sunday on or before `date`, clamped to `NaiveDate::MIN`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = Duration::days(i64::from(date.weekday().num_days_from_sunday()));
    date.checked_sub_signed(back).unwrap_or(NaiveDate::MIN)
}

/// The Saturday on or after `date`, clamped to `NaiveDate::MAX`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date)
        .checked_add_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MAX)
}

/// First and last day of the Sunday-start week containing `date`.
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    (week_start(date), week_end(date))
}

/// The whole of `date` as an inclusive timestamp range.
pub fn day_range(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    (date.and_time(NaiveTime::MIN), date.and_time(end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::event::EventId;
    use chrono::Weekday;

    const NO_EVENTS: &[Event] = &[];

    fn bounds(grid: &MonthGrid<'_>) -> (NaiveDate, NaiveDate) {
        let cells = grid.cells();
        (cells[0].date, cells[cells.len() - 1].date)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_on(id: u64, day: NaiveDate) -> Event {
        let start = day.and_hms_opt(9, 0, 0).unwrap();
        Event {
            id: EventId(id),
            title: format!("Event {id}"),
            category: Category::CommunityMeeting,
            start,
            end: start + Duration::hours(2),
            location: None,
            description: None,
            max_attendees: None,
            current_attendees: None,
            contact: None,
        }
    }

    #[test]
    fn test_march_2024_grid_bounds() {
        let grid = MonthGrid::build(date(2024, 3, 15), NO_EVENTS, date(2024, 3, 20));

        assert_eq!(bounds(&grid), (date(2024, 2, 25), date(2024, 4, 6)));
        assert_eq!(grid.cells().len(), 42);
        assert_eq!(grid.weeks().count(), 6);
        assert_eq!(grid.title(), "March 2024");

        let today = grid.cell(date(2024, 3, 20)).unwrap();
        assert!(today.is_today);
        assert!(today.in_month);
        assert!(!grid.cell(date(2024, 2, 29)).unwrap().in_month);
    }

    #[test]
    fn test_every_month_is_week_aligned() {
        let mut month = date(2023, 1, 1);
        while month < date(2027, 1, 1) {
            let grid = MonthGrid::build(month, NO_EVENTS, month);
            let (first, last) = bounds(&grid);

            assert_eq!(grid.cells().len() % 7, 0, "{month}");
            assert_eq!(first.weekday(), Weekday::Sun, "{month}");
            assert_eq!(last.weekday(), Weekday::Sat, "{month}");
            assert!((month - first).num_days() <= 6, "{month}");
            assert!((last - last_of_month(month)).num_days() <= 6, "{month}");
            assert!(first <= month && last >= last_of_month(month));

            month = month.checked_add_months(Months::new(1)).unwrap();
        }
    }

    #[test]
    fn test_events_land_on_their_start_day() {
        let events = vec![
            event_on(1, date(2024, 3, 10)),
            event_on(2, date(2024, 3, 10)),
            event_on(3, date(2024, 2, 26)),
            event_on(4, date(2024, 5, 1)),
        ];
        let grid = MonthGrid::build(date(2024, 3, 1), &events, date(2024, 3, 1));

        let ids = |d| -> Vec<u64> { grid.cell(d).unwrap().events.iter().map(|e| e.id.0).collect() };
        assert_eq!(ids(date(2024, 3, 10)), vec![1, 2]);
        // Leading days from the previous month still carry their events.
        assert_eq!(ids(date(2024, 2, 26)), vec![3]);
        assert!(ids(date(2024, 3, 11)).is_empty());

        let placed: usize = grid.cells().iter().map(|c| c.events.len()).sum();
        assert_eq!(placed, 3);
    }

    #[test]
    fn test_indicators_cap_with_overflow() {
        let day = date(2024, 3, 10);
        let events: Vec<Event> = (1..=5).map(|id| event_on(id, day)).collect();
        let grid = MonthGrid::build(day, &events, day);
        let cell = grid.cell(day).unwrap();

        let indicators = cell.indicators(DEFAULT_INDICATOR_CAP);
        assert_eq!(indicators.shown.len(), 3);
        assert_eq!(indicators.overflow, 2);
        assert_eq!(cell.events.len(), 5);

        let few = MonthGrid::build(day, &events[..2], day);
        let indicators = few.cell(day).unwrap().indicators(DEFAULT_INDICATOR_CAP);
        assert_eq!(indicators.shown.len(), 2);
        assert_eq!(indicators.overflow, 0);
    }

    #[test]
    fn test_week_and_day_views() {
        let events = vec![event_on(1, date(2024, 3, 10)), event_on(2, date(2024, 3, 16))];

        let week = build_week(date(2024, 3, 13), &events, date(2024, 3, 13));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, date(2024, 3, 10));
        assert_eq!(week[6].date, date(2024, 3, 16));
        assert!(week[3].is_today);
        assert_eq!(week[0].events.len() + week[6].events.len(), 2);

        let day = build_day(date(2024, 3, 16), &events, date(2024, 3, 1));
        assert_eq!(day.events.len(), 1);
        assert!(!day.is_today);

        let (from, to) = day_range(date(2024, 3, 16));
        assert!(from < events[1].start && events[1].start < to);
    }

    #[test]
    fn test_leap_february_bounds() {
        assert_eq!(last_of_month(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(last_of_month(date(2023, 12, 31)), date(2023, 12, 31));
        // Feb 2015 starts on Sunday and has 28 days: exactly four rows.
        assert_eq!(MonthGrid::build(date(2015, 2, 1), NO_EVENTS, date(2015, 2, 1)).cells().len(), 28);
    }

    #[test]
    fn test_grids_at_the_ends_of_the_calendar() {
        assert_eq!(week_start(NaiveDate::MIN), NaiveDate::MIN);
        assert_eq!(week_end(NaiveDate::MAX), NaiveDate::MAX);

        for edge in [NaiveDate::MIN, NaiveDate::MAX] {
            let week = build_week(edge, NO_EVENTS, edge);
            assert!(!week.is_empty() && week.len() <= 7, "{edge}");
            assert!(week.iter().all(|c| c.events.is_empty()));

            let grid = MonthGrid::build(edge, NO_EVENTS, edge);
            assert!(!grid.cells().is_empty(), "{edge}");
        }
    }
}
