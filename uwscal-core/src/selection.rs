//! Which event is open in the detail view, and which day has focus.
//!
//! Ids are not checked against the loaded events here. Selecting an id that
//! does not exist is allowed; the detail projection turns it into a
//! not-found state.

use chrono::NaiveDate;

use crate::event::EventId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    NoSelection,
    EventSelected(EventId),
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    selection: Selection,
    focus: NaiveDate,
}

impl SelectionController {
    pub fn new(today: NaiveDate) -> Self {
        SelectionController {
            selection: Selection::NoSelection,
            focus: today,
        }
    }

    /// Select `id`. Re-selecting the current event is a no-op.
    pub fn select(&mut self, id: EventId) {
        self.selection = Selection::EventSelected(id);
    }

    pub fn clear(&mut self) {
        self.selection = Selection::NoSelection;
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<EventId> {
        match self.selection {
            Selection::EventSelected(id) => Some(id),
            Selection::NoSelection => None,
        }
    }

    pub fn set_focus(&mut self, date: NaiveDate) {
        self.focus = date;
    }

    pub fn focus(&self) -> NaiveDate {
        self.focus
    }
}
