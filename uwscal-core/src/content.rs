//! Page content served as-is from `content.json`.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{CalError, CalResult};

/// Page key → content object. Nothing here is interpreted; the site front
/// end renders it.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    pages: Map<String, Value>,
}

impl ContentStore {
    pub fn from_json(json: &str) -> CalResult<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(pages) => Ok(ContentStore { pages }),
            _ => Err(CalError::Serialization(
                "content must be an object keyed by page".to_string(),
            )),
        }
    }

    pub async fn load(path: &Path) -> CalResult<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    pub fn page(&self, key: &str) -> Option<&Value> {
        self.pages.get(key)
    }
}
