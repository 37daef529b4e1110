use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use uwscal_core::coordinator::ViewCoordinator;

use crate::render::Render;

pub fn run(calendar: &ViewCoordinator, now: NaiveDateTime) -> Result<()> {
    let stats = calendar.stats(now).context("Events are not loaded")?;
    println!("{}", stats.render());
    Ok(())
}
