//! Terminal rendering for calendar projections.
//!
//! Category colors come from the registry and are applied with owo_colors'
//! truecolor; categories without a usable color render plain.

use chrono::{Datelike, NaiveDateTime};
use owo_colors::OwoColorize;
use uwscal_core::coordinator::FilterToggle;
use uwscal_core::detail::{AttendanceBar, DetailView, EventDetail};
use uwscal_core::grid::{GridCell, MonthGrid};
use uwscal_core::list::{DateGroup, ListSection, format_time};
use uwscal_core::{CalendarStats, CategoryRegistry, CategoryStyle, Event};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Width of one month grid column, in visible characters
const CELL_WIDTH: usize = 9;

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Width of the attendance bar in the detail view
const BAR_WIDTH: usize = 20;

fn paint(text: &str, style: &CategoryStyle) -> String {
    match style.rgb() {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text.to_string(),
    }
}

/// One event as a list line: time, colored marker, title and id.
pub fn render_event_line(event: &Event, registry: &CategoryRegistry) -> String {
    let style = registry.lookup(&event.category);
    let mut line = format!(
        "  {:>8}  {} {} {}",
        format_time(event.start.time()),
        paint("●", style),
        event.title,
        format!("#{}", event.id).dimmed()
    );
    if let Some(location) = &event.location {
        line.push_str(&format!(" {}", location.dimmed()));
    }
    line
}

pub fn render_month(grid: &MonthGrid<'_>, registry: &CategoryRegistry, cap: usize) -> String {
    let mut lines = vec![grid.title().bold().to_string()];

    let header: String = WEEKDAY_HEADER
        .iter()
        .map(|d| format!("{d:<CELL_WIDTH$}"))
        .collect();
    lines.push(header.trim_end().dimmed().to_string());

    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| render_cell(cell, registry, cap))
            .collect();
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

fn render_cell(cell: &GridCell<'_>, registry: &CategoryRegistry, cap: usize) -> String {
    let day = format!("{:>2}", cell.date.day());
    let mut out = if cell.is_today {
        day.reversed().to_string()
    } else if !cell.in_month {
        day.dimmed().to_string()
    } else {
        day
    };
    let mut width = 2;

    let indicators = cell.indicators(cap);
    if !indicators.shown.is_empty() {
        out.push(' ');
        width += 1;
    }
    for event in &indicators.shown {
        out.push_str(&paint("•", registry.lookup(&event.category)));
        width += 1;
    }
    if indicators.overflow > 0 {
        let more = format!("+{}", indicators.overflow);
        width += more.len();
        out.push_str(&more.dimmed().to_string());
    }

    out.push_str(&" ".repeat(CELL_WIDTH.saturating_sub(width)));
    out
}

/// Days of the week view, each followed by its events.
pub fn render_days(cells: &[GridCell<'_>], registry: &CategoryRegistry) -> String {
    let mut lines = Vec::new();

    for cell in cells {
        let heading = cell.date.format("%a %b %-d").to_string();
        if cell.is_today {
            lines.push(format!("{} {}", heading.bold(), "(today)".dimmed()));
        } else {
            lines.push(heading.bold().to_string());
        }

        if !cell.has_events() {
            lines.push(format!("  {}", "No events".dimmed()));
        }
        for event in &cell.events {
            lines.push(render_event_line(event, registry));
        }
    }

    lines.join("\n")
}

pub fn render_groups(groups: &[DateGroup<'_>], registry: &CategoryRegistry, now: NaiveDateTime) -> String {
    let mut lines = Vec::new();

    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(group.label(now).to_string().bold().to_string());
        for event in &group.events {
            lines.push(render_event_line(event, registry));
        }
    }

    lines.join("\n")
}

pub fn render_section(section: &ListSection<'_>, registry: &CategoryRegistry, now: NaiveDateTime) -> String {
    let title = section.title.bold().underline().to_string();
    if section.is_empty() {
        return format!("{}\n{}", title, "No events found".dimmed());
    }
    let count = match section.event_count() {
        1 => "1 event".to_string(),
        n => format!("{n} events"),
    };
    format!("{} {}\n{}", title, count.dimmed(), render_groups(&section.groups, registry, now))
}

impl Render for FilterToggle<'_> {
    fn render(&self) -> String {
        if self.active {
            paint(&format!("● {}", self.style.label), self.style)
        } else {
            format!("○ {}", self.style.label).dimmed().to_string()
        }
    }
}

/// Category legend, showing which filters are on.
pub fn render_legend(toggles: &[FilterToggle<'_>]) -> String {
    toggles
        .iter()
        .map(Render::render)
        .collect::<Vec<_>>()
        .join("  ")
}

impl Render for AttendanceBar {
    fn render(&self) -> String {
        let filled = (self.percent.min(100) as usize * BAR_WIDTH) / 100;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        let bar = if self.percent >= 100 {
            bar.red().to_string()
        } else {
            bar.green().to_string()
        };
        format!("{} {} {}", self.headline().bold(), bar, self.summary().dimmed())
    }
}

impl Render for EventDetail<'_> {
    fn render(&self) -> String {
        let event = self.event;
        let mut lines = vec![
            paint(&event.title, self.style).bold().to_string(),
            format!("   {}", paint(&self.style.label, self.style)),
            format!("📅 {}", self.date_label),
            format!("🕐 {}", self.time_label),
        ];

        if let Some(location) = &event.location {
            lines.push(format!("📍 {location}"));
        }
        if let Some(capacity) = &self.capacity_label {
            lines.push(format!("👥 {capacity}"));
        }
        if let Some(bar) = &self.attendance {
            lines.push(format!("   {}", bar.render()));
        }
        if let Some(description) = &event.description {
            lines.push(String::new());
            lines.push(description.clone());
        }
        if let Some(link) = &self.contact_link {
            lines.push(String::new());
            lines.push(format!("Contact: {}", link.underline()));
        }

        lines.join("\n")
    }
}

impl Render for DetailView<'_> {
    fn render(&self) -> String {
        match self {
            DetailView::Hidden => String::new(),
            DetailView::NotFound(id) => format!("Event #{id} is not on the calendar").dimmed().to_string(),
            DetailView::Event(detail) => detail.render(),
        }
    }
}

impl Render for CalendarStats {
    fn render(&self) -> String {
        [
            ("Total events", self.total_events as u64),
            ("Upcoming events", self.upcoming_count as u64),
            ("Volunteer spots", self.volunteer_spots_total),
        ]
        .iter()
        .map(|(label, value)| format!("{:<16} {}", label.dimmed(), value.bold()))
        .collect::<Vec<_>>()
        .join("\n")
    }
}
