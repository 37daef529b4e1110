//! The `Loading -> Ready | Failed` lifecycle of the session's events.
//!
//! Every load attempt gets a [`LoadTicket`]. Starting a new attempt (a retry)
//! invalidates all earlier tickets, so a slow earlier fetch that finishes late
//! cannot overwrite the result of the newer one.

use serde_json::Value;

use crate::error::{CalError, CalResult};
use crate::store::{EventStore, LoadReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(EventStore),
    Failed(String),
}

impl LoadState {
    pub fn store(&self) -> Option<&EventStore> {
        match self {
            LoadState::Ready(store) => Some(store),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Loader {
    generation: u64,
    state: LoadState,
}

impl Default for Loader {
    fn default() -> Self {
        Loader {
            generation: 0,
            state: LoadState::Loading,
        }
    }
}

impl Loader {
    /// Start a new load attempt, superseding any in flight.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        tracing::debug!(generation = self.generation, "event load started");
        LoadTicket(self.generation)
    }

    /// Apply the outcome of a fetch. Returns the load report if the ticket
    /// was current, or `None` if the result was stale and discarded.
    pub fn finish(
        &mut self,
        ticket: LoadTicket,
        result: CalResult<Vec<Value>>,
    ) -> Option<LoadReport> {
        if ticket.0 != self.generation {
            tracing::debug!(
                stale = ticket.0,
                current = self.generation,
                "discarding superseded event load"
            );
            return None;
        }

        match result {
            Ok(records) => {
                let (store, report) = EventStore::from_values(records);
                tracing::info!(
                    loaded = report.loaded,
                    dropped = report.dropped.len(),
                    "events ready"
                );
                self.state = LoadState::Ready(store);
                Some(report)
            }
            Err(err) => {
                let message = match err {
                    CalError::LoadFailure(msg) => msg,
                    other => other.to_string(),
                };
                tracing::error!(error = %message, "event load failed");
                self.state = LoadState::Failed(message);
                Some(LoadReport::default())
            }
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: u64) -> Value {
        json!({
            "id": id,
            "title": format!("Event {id}"),
            "category": "workshop",
            "start": "2024-03-10T09:00",
            "end": "2024-03-10T10:00"
        })
    }

    #[test]
    fn test_starts_loading() {
        let loader = Loader::default();
        assert!(matches!(loader.state(), LoadState::Loading));
        assert!(loader.state().store().is_none());
    }

    #[test]
    fn test_success_moves_to_ready() {
        let mut loader = Loader::default();
        let ticket = loader.begin();
        let report = loader.finish(ticket, Ok(vec![record(1), record(2)])).unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(loader.state().store().map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_failure_is_retryable() {
        let mut loader = Loader::default();
        let ticket = loader.begin();
        loader.finish(ticket, Err(CalError::LoadFailure("connection refused".into())));

        match loader.state() {
            LoadState::Failed(msg) => assert_eq!(msg, "connection refused"),
            other => panic!("Expected Failed, got {:?}", other),
        }

        let retry = loader.begin();
        assert!(matches!(loader.state(), LoadState::Loading));
        loader.finish(retry, Ok(vec![record(1)]));
        assert!(matches!(loader.state(), LoadState::Ready(_)));
    }

    #[test]
    fn test_retry_supersedes_in_flight_load() {
        let mut loader = Loader::default();
        let first = loader.begin();
        let second = loader.begin();

        assert!(loader.finish(second, Ok(vec![record(1), record(2)])).is_some());
        // The first request finishes late with different data; it is ignored.
        assert!(loader.finish(first, Ok(vec![record(3)])).is_none());
        assert_eq!(loader.state().store().map(|s| s.len()), Some(2));

        let stale_failure = loader.finish(first, Err(CalError::LoadFailure("timeout".into())));
        assert!(stale_failure.is_none());
        assert!(matches!(loader.state(), LoadState::Ready(_)));
    }
}
