use std::sync::Arc;

use anyhow::{Context, Result};
use uwscal_core::EventStore;
use uwscal_core::config::UwscalConfig;
use uwscal_core::content::ContentStore;

pub const API_VERSION: &str = "1.0.0";

/// Shared application state. Both data files are read once at startup.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<EventStore>,
    pub content: Arc<ContentStore>,
}

impl AppState {
    pub async fn load(config: &UwscalConfig) -> Result<Self> {
        let events_path = config.events_path();
        let json = tokio::fs::read_to_string(&events_path)
            .await
            .with_context(|| format!("Could not read {}", events_path.display()))?;
        let (events, report) = EventStore::from_json(&json)
            .with_context(|| format!("Could not parse {}", events_path.display()))?;
        tracing::info!(loaded = report.loaded, dropped = report.dropped.len(), "events loaded");

        let content_path = config.content_path();
        let content = ContentStore::load(&content_path)
            .await
            .with_context(|| format!("Could not load {}", content_path.display()))?;

        Ok(AppState::new(events, content))
    }

    pub fn new(events: EventStore, content: ContentStore) -> Self {
        AppState {
            events: Arc::new(events),
            content: Arc::new(content),
        }
    }
}
