mod commands;
mod render;
mod source;
mod utils;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uwscal_core::EventId;
use uwscal_core::config::UwscalConfig;
use uwscal_core::filter::DesktopView;

use crate::source::Source;

#[derive(Parser)]
#[command(name = "uwscal")]
#[command(about = "Browse the community event calendar")]
struct Cli {
    /// Events file or URL (default: events_url from config, else <data_dir>/events.json)
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Toggle a category filter off; repeat for several (e.g. --category workshop)
    #[arg(short, long = "category", global = true)]
    categories: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Month grid with event markers
    Month {
        /// Month to show (YYYY-MM, default: this month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Upcoming events, grouped by day
    List,
    /// Events on a single day
    Day {
        /// Day to show (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Desktop calendar view: month, week, day or agenda
    View {
        view: DesktopView,

        /// Date to focus (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Full details of one event
    Show { id: EventId },
    /// Calendar-wide counters
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = UwscalConfig::load()?;
    let now = Local::now().naive_local();

    let source = Source::resolve(cli.source.as_deref(), &config)?;
    let mut calendar = commands::open_calendar(&config, &source, &cli.categories, now.date()).await?;

    match cli.command {
        Commands::Month { month } => {
            if let Some(month) = month {
                calendar.focus_date(commands::parse_month(&month)?);
            }
            commands::month::run(&calendar, now)
        }
        Commands::List => commands::list::run(&mut calendar, now),
        Commands::Day { date } => {
            if let Some(date) = date {
                calendar.focus_date(commands::parse_date(&date)?);
            }
            commands::day::run(&mut calendar, now)
        }
        Commands::View { view, date } => {
            if let Some(date) = date {
                calendar.focus_date(commands::parse_date(&date)?);
            }
            commands::view::run(&mut calendar, view, now)
        }
        Commands::Show { id } => commands::show::run(&mut calendar, id),
        Commands::Stats => commands::stats::run(&calendar, now),
    }
}
