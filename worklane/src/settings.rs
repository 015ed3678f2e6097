//! Board settings: color theme and defaults, persisted as YAML.
//!
//! A settings object has three explicit steps: `load` from disk (missing
//! file yields defaults), `apply` to resolve the effective theme, and
//! `persist` back to disk.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the host preference
    #[default]
    System,
}

/// Persisted board settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    /// Column new tasks land in when none is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_column: Option<String>,
    #[serde(default = "default_notifications_enabled")]
    pub notifications_enabled: bool,
}

fn default_notifications_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            default_column: None,
            notifications_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file; a missing file yields defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).await?;
        let settings: Settings = serde_yaml_ng::from_str(&content)?;
        Ok(settings)
    }

    /// Resolve the effective theme given the host's preference.
    ///
    /// `System` defers to the host; explicit choices win.
    pub fn apply(&self, host_theme: Theme) -> Theme {
        match self.theme {
            Theme::System => match host_theme {
                // A host reporting System has no opinion; fall back to light
                Theme::System => Theme::Light,
                explicit => explicit,
            },
            explicit => explicit,
        }
    }

    /// Persist settings to a YAML file.
    pub async fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).await?;
        debug!(path = %path.display(), "settings persisted");
        Ok(())
    }
}
