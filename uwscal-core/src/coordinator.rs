//! Wires user input to calendar state and derives everything that is shown.
//!
//! The coordinator owns all session state: load state, filters, view modes,
//! selection and focused date. Projections are computed on demand from that
//! state every time they are asked for, so nothing can go stale after an
//! input. Time-relative projections take `now` explicitly.

use chrono::{Duration, Months, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::category::{Category, CategoryRegistry, CategoryStyle};
use crate::detail::DetailView;
use crate::error::CalResult;
use crate::event::{Event, EventId};
use crate::filter::{DesktopView, FilterState, MobileView, ViewMode};
use crate::grid::{DEFAULT_INDICATOR_CAP, GridCell, MonthGrid, build_day, build_week};
use crate::list::{DateGroup, ListSection, group_by_day, short_date};
use crate::load::{LoadState, LoadTicket, Loader};
use crate::selection::{Selection, SelectionController};
use crate::source::EventSource;
use crate::store::{CalendarStats, EventStore, LoadReport, by_date_range, on_date, upcoming};

/// Days covered by the desktop agenda view.
pub const AGENDA_LENGTH_DAYS: i64 = 30;

/// Upcoming events shown in the mobile list.
pub const DEFAULT_UPCOMING_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorOptions {
    pub upcoming_limit: usize,
    pub indicator_cap: usize,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        CoordinatorOptions {
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
            indicator_cap: DEFAULT_INDICATOR_CAP,
        }
    }
}

/// What the desktop calendar shows for the current view mode.
#[derive(Debug, Clone)]
pub enum DesktopProjection<'a> {
    Month(MonthGrid<'a>),
    Week(Vec<GridCell<'a>>),
    Day(GridCell<'a>),
    Agenda(Vec<DateGroup<'a>>),
}

/// One filter button.
#[derive(Debug, Clone)]
pub struct FilterToggle<'a> {
    pub category: &'a Category,
    pub style: &'a CategoryStyle,
    pub active: bool,
}

/// Every projection derived from the current state.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub view: ViewMode,
    pub focus: NaiveDate,
    pub filters: Vec<FilterToggle<'a>>,
    pub stats: CalendarStats,
    pub desktop: DesktopProjection<'a>,
    /// The mobile month grid; `None` in list mode, where only the list shows
    pub mobile_grid: Option<MonthGrid<'a>>,
    pub mobile_list: ListSection<'a>,
    pub detail: DetailView<'a>,
}

/// The calendar as the UI sees it: nothing is derived until events are ready.
#[derive(Debug, Clone)]
pub enum CalendarView<'a> {
    Loading,
    Failed { message: String },
    Ready(Box<Snapshot<'a>>),
}

#[derive(Debug)]
pub struct ViewCoordinator {
    registry: CategoryRegistry,
    options: CoordinatorOptions,
    loader: Loader,
    filter: FilterState,
    selection: SelectionController,
}

impl ViewCoordinator {
    pub fn new(registry: CategoryRegistry, options: CoordinatorOptions, today: NaiveDate) -> Self {
        let filter = FilterState::new(&registry);
        ViewCoordinator {
            registry,
            options,
            loader: Loader::default(),
            filter,
            selection: SelectionController::new(today),
        }
    }

    // Loading

    /// Start (or restart) a load. Any earlier in-flight load is superseded.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: CalResult<Vec<Value>>,
    ) -> Option<LoadReport> {
        self.loader.finish(ticket, result)
    }

    /// Fetch from `source` and apply the result.
    pub async fn load_from<S: EventSource>(&mut self, source: &S) -> Option<LoadReport> {
        let ticket = self.begin_load();
        tracing::info!(source = %source.describe(), "loading events");
        let result = source.fetch().await;
        self.finish_load(ticket, result)
    }

    pub fn load_state(&self) -> &LoadState {
        self.loader.state()
    }

    pub fn store(&self) -> Option<&EventStore> {
        self.loader.state().store()
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    // Input

    /// Flip a category filter. View mode and selection are left untouched.
    pub fn toggle_category(&mut self, category: &Category) -> bool {
        self.filter.toggle(category)
    }

    pub fn set_desktop_view(&mut self, view: DesktopView) {
        self.filter.set_desktop_view(view);
    }

    pub fn set_mobile_view(&mut self, view: MobileView) {
        self.filter.set_mobile_view(view);
    }

    /// Move the focused date one month back, clamping the day to the length
    /// of the target month.
    pub fn prev_month(&mut self) {
        let focus = self.selection.focus();
        let moved = focus.checked_sub_months(Months::new(1)).unwrap_or(focus);
        self.selection.set_focus(moved);
    }

    pub fn next_month(&mut self) {
        let focus = self.selection.focus();
        let moved = focus.checked_add_months(Months::new(1)).unwrap_or(focus);
        self.selection.set_focus(moved);
    }

    pub fn focus_date(&mut self, date: NaiveDate) {
        self.selection.set_focus(date);
    }

    /// Open an event in the detail view. The id is not validated.
    pub fn activate_event(&mut self, id: EventId) {
        self.selection.select(id);
    }

    pub fn close_detail(&mut self) {
        self.selection.clear();
    }

    // State

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn view_mode(&self) -> ViewMode {
        self.filter.view()
    }

    pub fn focus(&self) -> NaiveDate {
        self.selection.focus()
    }

    pub fn selection(&self) -> Selection {
        self.selection.selection()
    }

    pub fn options(&self) -> CoordinatorOptions {
        self.options
    }

    // Projections. Each returns `None` until events are ready.

    pub fn filtered_events(&self) -> Option<Vec<&Event>> {
        let store = self.store()?;
        Some(self.filter.apply(store))
    }

    /// Filtered events starting on `date`.
    pub fn events_for_date(&self, date: NaiveDate) -> Option<Vec<&Event>> {
        let filtered = self.filtered_events()?;
        Some(on_date(filtered, date))
    }

    /// Filtered events after `now`, soonest first.
    pub fn upcoming_events(&self, now: NaiveDateTime) -> Option<Vec<&Event>> {
        let filtered = self.filtered_events()?;
        Some(upcoming(filtered, now, self.options.upcoming_limit))
    }

    /// Month grid for the focused month over the filtered events.
    pub fn month_grid(&self, today: NaiveDate) -> Option<MonthGrid<'_>> {
        let filtered = self.filtered_events()?;
        Some(MonthGrid::build(self.focus(), filtered, today))
    }

    pub fn desktop_projection(&self, now: NaiveDateTime) -> Option<DesktopProjection<'_>> {
        let filtered = self.filtered_events()?;
        Some(self.desktop_for(filtered, now))
    }

    /// The list under the mobile calendar: upcoming events in list mode,
    /// otherwise the focused day's events.
    pub fn mobile_list(&self, now: NaiveDateTime) -> Option<ListSection<'_>> {
        let filtered = self.filtered_events()?;
        Some(self.mobile_list_for(filtered, now))
    }

    /// Counters over all loaded events; filters do not apply.
    pub fn stats(&self, now: NaiveDateTime) -> Option<CalendarStats> {
        Some(self.store()?.stats(now))
    }

    pub fn detail(&self) -> Option<DetailView<'_>> {
        let store = self.store()?;
        Some(DetailView::resolve(self.selection.selection(), store, &self.registry))
    }

    pub fn filter_toggles(&self) -> Vec<FilterToggle<'_>> {
        self.registry
            .iter()
            .map(|(category, style)| FilterToggle {
                category,
                style,
                active: self.filter.is_active(category),
            })
            .collect()
    }

    /// Derive every projection at once.
    pub fn snapshot(&self, now: NaiveDateTime) -> CalendarView<'_> {
        match self.loader.state() {
            LoadState::Loading => CalendarView::Loading,
            LoadState::Failed(message) => CalendarView::Failed {
                message: message.clone(),
            },
            LoadState::Ready(store) => {
                let view = self.filter.view();
                let filtered = self.filter.apply(store);
                let focus = self.focus();

                let mobile_grid = match view.mobile {
                    MobileView::Calendar => {
                        Some(MonthGrid::build(focus, filtered.iter().copied(), now.date()))
                    }
                    MobileView::List => None,
                };

                CalendarView::Ready(Box::new(Snapshot {
                    view,
                    focus,
                    filters: self.filter_toggles(),
                    stats: store.stats(now),
                    desktop: self.desktop_for(filtered.clone(), now),
                    mobile_grid,
                    mobile_list: self.mobile_list_for(filtered, now),
                    detail: DetailView::resolve(self.selection.selection(), store, &self.registry),
                }))
            }
        }
    }

    fn desktop_for<'a>(&self, filtered: Vec<&'a Event>, now: NaiveDateTime) -> DesktopProjection<'a> {
        let focus = self.focus();
        let today = now.date();

        match self.filter.view().desktop {
            DesktopView::Month => DesktopProjection::Month(MonthGrid::build(focus, filtered, today)),
            DesktopView::Week => DesktopProjection::Week(build_week(focus, filtered, today)),
            DesktopView::Day => DesktopProjection::Day(build_day(focus, filtered, today)),
            DesktopView::Agenda => {
                let (from, to) = agenda_range(focus);
                DesktopProjection::Agenda(group_by_day(by_date_range(filtered, from, to)))
            }
        }
    }

    fn mobile_list_for<'a>(&self, filtered: Vec<&'a Event>, now: NaiveDateTime) -> ListSection<'a> {
        match self.filter.view().mobile {
            MobileView::List => ListSection {
                title: "Upcoming Events".to_string(),
                groups: group_by_day(upcoming(filtered, now, self.options.upcoming_limit)),
            },
            MobileView::Calendar => {
                let focus = self.focus();
                ListSection {
                    title: format!("Events for {}", short_date(focus)),
                    groups: group_by_day(on_date(filtered, focus)),
                }
            }
        }
    }
}

/// Inclusive timestamp range covered by the agenda starting on `date`.
fn agenda_range(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let from = date.and_time(chrono::NaiveTime::MIN);
    let to = from
        .checked_add_signed(Duration::days(AGENDA_LENGTH_DAYS) - Duration::seconds(1))
        .unwrap_or(NaiveDateTime::MAX);
    (from, to)
}
