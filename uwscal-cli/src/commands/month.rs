use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use uwscal_core::coordinator::ViewCoordinator;

use crate::render::{render_legend, render_month};

pub fn run(calendar: &ViewCoordinator, now: NaiveDateTime) -> Result<()> {
    let grid = calendar
        .month_grid(now.date())
        .context("Events are not loaded")?;

    println!("{}", render_month(&grid, calendar.registry(), calendar.options().indicator_cap));
    println!();
    println!("{}", render_legend(&calendar.filter_toggles()));

    Ok(())
}
