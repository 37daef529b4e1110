//! Community event calendar.
//!
//! This crate holds everything the site's calendar needs short of drawing it:
//! - `event`, `store`: the event model and the session's event collection
//! - `category`: category display metadata
//! - `grid`, `list`, `detail`: month grids, day-grouped lists and the event detail view
//! - `filter`, `selection`, `coordinator`: interactive state and derivation of all projections
//! - `source`, `load`: fetching events and the loading lifecycle

pub mod category;
pub mod config;
pub mod content;
pub mod coordinator;
pub mod detail;
pub mod error;
pub mod event;
pub mod filter;
pub mod grid;
pub mod list;
pub mod load;
pub mod selection;
pub mod source;
pub mod store;

pub use category::{Category, CategoryIcon, CategoryRegistry, CategoryStyle};
pub use coordinator::{CalendarView, DesktopProjection, Snapshot, ViewCoordinator};
pub use error::{CalError, CalResult};
pub use event::{Event, EventId, RawEvent};
pub use store::{CalendarStats, EventStore};
