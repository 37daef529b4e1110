//! Active category filters and view modes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryRegistry};
use crate::event::Event;
use crate::store::by_categories;

/// Desktop calendar layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesktopView {
    #[default]
    Month,
    Week,
    Day,
    Agenda,
}

impl DesktopView {
    pub const ALL: [DesktopView; 4] = [
        DesktopView::Month,
        DesktopView::Week,
        DesktopView::Day,
        DesktopView::Agenda,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DesktopView::Month => "Month",
            DesktopView::Week => "Week",
            DesktopView::Day => "Day",
            DesktopView::Agenda => "Agenda",
        }
    }
}

impl fmt::Display for DesktopView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DesktopView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "month" => Ok(DesktopView::Month),
            "week" => Ok(DesktopView::Week),
            "day" => Ok(DesktopView::Day),
            "agenda" => Ok(DesktopView::Agenda),
            other => Err(format!(
                "Unknown view '{other}'. Expected month, week, day or agenda"
            )),
        }
    }
}

/// Mobile layouts: month grid with the focused day's events below, or a
/// plain list of upcoming events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileView {
    #[default]
    Calendar,
    List,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewMode {
    pub desktop: DesktopView,
    pub mobile: MobileView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    active: BTreeSet<Category>,
    view: ViewMode,
}

impl FilterState {
    /// Every registered category active, default views.
    pub fn new(registry: &CategoryRegistry) -> Self {
        FilterState {
            active: registry.categories().cloned().collect(),
            view: ViewMode::default(),
        }
    }

    /// Flip `category` in or out of the active set. Returns whether it is
    /// active afterwards.
    pub fn toggle(&mut self, category: &Category) -> bool {
        if self.active.remove(category) {
            false
        } else {
            self.active.insert(category.clone());
            true
        }
    }

    pub fn is_active(&self, category: &Category) -> bool {
        self.active.contains(category)
    }

    pub fn active(&self) -> &BTreeSet<Category> {
        &self.active
    }

    pub fn apply<'a>(&self, events: impl IntoIterator<Item = &'a Event>) -> Vec<&'a Event> {
        by_categories(events, &self.active)
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_desktop_view(&mut self, view: DesktopView) {
        self.view.desktop = view;
    }

    pub fn set_mobile_view(&mut self, view: MobileView) {
        self.view.mobile = view;
    }
}
