use anyhow::{Context, Result};
use uwscal_core::EventId;
use uwscal_core::coordinator::ViewCoordinator;

use crate::render::Render;

pub fn run(calendar: &mut ViewCoordinator, id: EventId) -> Result<()> {
    calendar.activate_event(id);

    let detail = calendar
        .detail()
        .filter(|d| d.is_open())
        .context("Events are not loaded")?;
    println!("{}", detail.render());

    Ok(())
}
