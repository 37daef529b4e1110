use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use uwscal_core::coordinator::ViewCoordinator;
use uwscal_core::filter::MobileView;

use crate::render::render_section;

/// Upcoming events, soonest first.
pub fn run(calendar: &mut ViewCoordinator, now: NaiveDateTime) -> Result<()> {
    calendar.set_mobile_view(MobileView::List);

    let section = calendar.mobile_list(now).context("Events are not loaded")?;
    println!("{}", render_section(&section, calendar.registry(), now));

    Ok(())
}
