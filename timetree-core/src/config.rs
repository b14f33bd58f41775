//! Export configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{TimeTreeError, TimeTreeResult};
use crate::zone::{TzDatabase, WithFallback, ZoneResolver};

/// Options for exporting TimeTree events, stored at
/// ~/.config/timetree-exporter/config.toml
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Zone used when an event names no zone or one the database doesn't know.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_timezone: Option<String>,

    /// Emit the label name as CATEGORIES alongside COLOR.
    pub export_categories: bool,
}

impl ExportConfig {
    pub fn config_path() -> TimeTreeResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TimeTreeError::Config("Could not determine config directory".into()))?
            .join("timetree-exporter");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from `path`, or defaults when the file doesn't exist.
    pub fn load(path: &Path) -> TimeTreeResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> TimeTreeResult<Self> {
        let config: ExportConfig =
            toml::from_str(content).map_err(|e| TimeTreeError::Config(e.to_string()))?;
        config.fallback_zone()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> TimeTreeResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| TimeTreeError::Config(e.to_string()))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// The configured fallback zone, validated against the zone database.
    pub fn fallback_zone(&self) -> TimeTreeResult<Option<Tz>> {
        match self.fallback_timezone.as_deref() {
            None => Ok(None),
            Some(name) => TzDatabase.resolve(name).map(Some).ok_or_else(|| {
                TimeTreeError::Config(format!("Unknown fallback_timezone '{name}'"))
            }),
        }
    }

    /// Zone resolver honoring `fallback_timezone`.
    pub fn zone_resolver(&self) -> TimeTreeResult<Box<dyn ZoneResolver>> {
        Ok(match self.fallback_zone()? {
            Some(tz) => Box::new(WithFallback::new(TzDatabase, tz)),
            None => Box::new(TzDatabase),
        })
    }
}
