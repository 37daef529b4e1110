//! Resolving `--source` into something events can be fetched from.

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;
use uwscal_core::config::UwscalConfig;
use uwscal_core::error::{CalError, CalResult};
use uwscal_core::source::{EventSource, JsonFileSource, parse_records};

/// Events served over HTTP, e.g. a running uwscal-server's `/api/events`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: Url) -> Self {
        HttpSource {
            url,
            client: reqwest::Client::new(),
        }
    }
}

impl EventSource for HttpSource {
    fn fetch(&self) -> impl Future<Output = CalResult<Vec<Value>>> + Send {
        let request = self.client.get(self.url.clone());
        let url = self.url.clone();
        async move {
            let failed = |e: &dyn std::fmt::Display| CalError::LoadFailure(format!("{url}: {e}"));

            let response = request
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| failed(&e))?;
            let body = response.text().await.map_err(|e| failed(&e))?;

            parse_records(&body).map_err(|e| failed(&e))
        }
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// A file or URL, picked from `--source`, then `events_url`, then the data directory.
#[derive(Debug, Clone)]
pub enum Source {
    File(JsonFileSource),
    Http(HttpSource),
}

impl Source {
    pub fn resolve(arg: Option<&str>, config: &UwscalConfig) -> Result<Self> {
        let Some(location) = arg.map(str::to_string).or_else(|| config.events_url.clone()) else {
            return Ok(Source::File(JsonFileSource::new(config.events_path())));
        };

        if location.starts_with("http://") || location.starts_with("https://") {
            let url = Url::parse(&location).with_context(|| format!("Invalid event source URL: {location}"))?;
            Ok(Source::Http(HttpSource::new(url)))
        } else {
            Ok(Source::File(JsonFileSource::new(PathBuf::from(location))))
        }
    }
}

impl EventSource for Source {
    fn fetch(&self) -> impl Future<Output = CalResult<Vec<Value>>> + Send {
        async move {
            match self {
                Source::File(source) => source.fetch().await,
                Source::Http(source) => source.fetch().await,
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Source::File(source) => source.describe(),
            Source::Http(source) => source.describe(),
        }
    }
}
