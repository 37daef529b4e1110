//! Where events come from.
//!
//! A source only has to produce an array of raw JSON event records; the
//! store does all the parsing so a bad record never fails the whole fetch.

use std::future::Future;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{CalError, CalResult};

pub trait EventSource {
    /// Fetch every event record the source has.
    fn fetch(&self) -> impl Future<Output = CalResult<Vec<Value>>> + Send;

    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// Events read from a JSON file on disk (the site's `events.json`).
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for JsonFileSource {
    fn fetch(&self) -> impl Future<Output = CalResult<Vec<Value>>> + Send {
        let path = self.path.clone();
        async move {
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| CalError::LoadFailure(format!("{}: {e}", path.display())))?;

            parse_records(&content)
                .map_err(|e| CalError::LoadFailure(format!("{}: {e}", path.display())))
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A fixed set of records held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Value>,
}

impl StaticSource {
    pub fn new(records: Vec<Value>) -> Self {
        StaticSource { records }
    }
}

impl EventSource for StaticSource {
    fn fetch(&self) -> impl Future<Output = CalResult<Vec<Value>>> + Send {
        let records = self.records.clone();
        async move { Ok(records) }
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }
}

/// Parse a JSON document that must be an array of records.
pub fn parse_records(json: &str) -> CalResult<Vec<Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(records) => Ok(records),
        other => Err(CalError::Serialization(format!(
            "expected an array of events, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
