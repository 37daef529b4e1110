pub mod day;
pub mod list;
pub mod month;
pub mod show;
pub mod stats;
pub mod view;

use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use uwscal_core::config::UwscalConfig;
use uwscal_core::coordinator::ViewCoordinator;
use uwscal_core::load::LoadState;
use uwscal_core::source::EventSource;
use uwscal_core::{Category, CategoryRegistry};

use crate::source::Source;
use crate::utils::tui::create_spinner;

/// Build a coordinator with the requested filters switched off and load it
/// from `source`.
pub async fn open_calendar(
    config: &UwscalConfig,
    source: &Source,
    hidden: &[String],
    today: NaiveDate,
) -> Result<ViewCoordinator> {
    let mut calendar = ViewCoordinator::new(config.registry(), config.coordinator_options(), today);

    for key in hidden {
        let category = resolve_category(calendar.registry(), key)?;
        calendar.toggle_category(&category);
    }

    let spinner = create_spinner(format!("Loading events from {}", source.describe()));
    let report = calendar.load_from(source).await;
    spinner.finish_and_clear();

    if let LoadState::Failed(message) = calendar.load_state() {
        anyhow::bail!("Could not load events: {message}");
    }

    if let Some(report) = report.filter(|r| !r.is_clean()) {
        let skipped = format!("Skipped {} malformed event record(s)", report.dropped.len());
        eprintln!("{}", skipped.yellow());
    }

    Ok(calendar)
}

fn resolve_category(registry: &CategoryRegistry, key: &str) -> Result<Category> {
    let category = Category::from_key(key);
    if !registry.contains(&category) {
        let available: Vec<_> = registry.categories().map(|c| c.key().to_string()).collect();
        anyhow::bail!(
            "Category '{}' not found. Available: {}",
            key,
            available.join(", ")
        );
    }
    Ok(category)
}

/// Parse `--date YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}

/// Parse `--month YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", s))
}
