//! uwscal configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::category::{CategoryOverride, CategoryRegistry};
use crate::coordinator::{CoordinatorOptions, DEFAULT_UPCOMING_LIMIT};
use crate::error::{CalError, CalResult};
use crate::grid::DEFAULT_INDICATOR_CAP;

static DEFAULT_DATA_PATH: &str = "data";
const DEFAULT_PORT: u16 = 5000;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_upcoming_limit() -> usize {
    DEFAULT_UPCOMING_LIMIT
}

fn default_indicator_cap() -> usize {
    DEFAULT_INDICATOR_CAP
}

/// Configuration at ~/.config/uwscal/config.toml, overridable with
/// `UWSCAL_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct UwscalConfig {
    /// Directory holding `events.json` and `content.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Where the CLI fetches events from when no `--source` is given
    #[serde(default)]
    pub events_url: Option<String>,

    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,

    #[serde(default = "default_indicator_cap")]
    pub indicator_cap: usize,

    #[serde(default)]
    pub categories: BTreeMap<String, CategoryOverride>,
}

impl Default for UwscalConfig {
    fn default() -> Self {
        UwscalConfig {
            data_dir: default_data_dir(),
            port: DEFAULT_PORT,
            events_url: None,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
            indicator_cap: DEFAULT_INDICATOR_CAP,
            categories: BTreeMap::new(),
        }
    }
}

impl UwscalConfig {
    pub fn config_path() -> CalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalError::Config("Could not determine config directory".into()))?
            .join("uwscal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, creating a commented-out default file on first
    /// run.
    pub fn load() -> CalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> CalResult<Self> {
        let config: UwscalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("UWSCAL").try_parsing(true))
            .build()
            .map_err(|e| CalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_path().join("events.json")
    }

    pub fn content_path(&self) -> PathBuf {
        self.data_path().join("content.json")
    }

    pub fn registry(&self) -> CategoryRegistry {
        CategoryRegistry::builtin().with_overrides(&self.categories)
    }

    pub fn coordinator_options(&self) -> CoordinatorOptions {
        CoordinatorOptions {
            upcoming_limit: self.upcoming_limit,
            indicator_cap: self.indicator_cap,
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalResult<()> {
        let contents = format!(
            "\
# uwscal configuration

# Directory containing events.json and content.json:
# data_dir = \"{DEFAULT_DATA_PATH}\"

# Port for uwscal-server:
# port = {DEFAULT_PORT}

# Events endpoint used by the uwscal CLI:
# events_url = \"http://localhost:{DEFAULT_PORT}/api/events\"

# How many upcoming events the list view shows:
# upcoming_limit = {DEFAULT_UPCOMING_LIMIT}

# Event markers per calendar day before \"+N more\":
# indicator_cap = {DEFAULT_INDICATOR_CAP}

# Relabel or recolor a category:
# [categories.workshop]
# label = \"Workshop/Training\"
# color = \"#1565C0\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
