use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;
use uwscal_core::coordinator::{AGENDA_LENGTH_DAYS, DesktopProjection, ViewCoordinator};
use uwscal_core::filter::DesktopView;

use crate::render::{render_days, render_groups, render_month};

/// One of the desktop calendar views around the focused date.
pub fn run(calendar: &mut ViewCoordinator, view: DesktopView, now: NaiveDateTime) -> Result<()> {
    calendar.set_desktop_view(view);

    let projection = calendar
        .desktop_projection(now)
        .context("Events are not loaded")?;
    let registry = calendar.registry();

    let out = match &projection {
        DesktopProjection::Month(grid) => {
            render_month(grid, registry, calendar.options().indicator_cap)
        }
        DesktopProjection::Week(cells) => render_days(cells, registry),
        DesktopProjection::Day(cell) => render_days(std::slice::from_ref(cell), registry),
        DesktopProjection::Agenda(groups) if groups.is_empty() => {
            format!("No events in the next {AGENDA_LENGTH_DAYS} days").dimmed().to_string()
        }
        DesktopProjection::Agenda(groups) => render_groups(groups, registry, now),
    };
    println!("{out}");

    Ok(())
}
