//! TOML-based application configuration.
//!
//! Holds the preset table, the default preset, the snooze length and the
//! tick cadence front-ends should drive the engine at.
//!
//! Configuration is read from `~/.config/respite/config.toml` (or
//! `$RESPITE_CONFIG`). A missing file means defaults; the file is never
//! written.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::config_path;
use crate::error::{ConfigError, Result};
use crate::sink::DisplaySink;
use crate::timer::{builtin_presets, BreakEngine, Preset, PresetId, PresetRegistry};

/// One `[[presets]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfig {
    pub id: PresetId,
    #[serde(default)]
    pub name: String,
    pub work_secs: u64,
    pub break_secs: u64,
}

impl From<&PresetConfig> for Preset {
    fn from(p: &PresetConfig) -> Self {
        Preset::from_secs(p.id, p.name.clone(), p.work_secs, p.break_secs)
    }
}

impl From<&Preset> for PresetConfig {
    fn from(p: &Preset) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            work_secs: p.work_duration.as_secs(),
            break_secs: p.break_duration.as_secs(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_preset")]
    pub default_preset: PresetId,
    #[serde(default = "default_snooze_secs")]
    pub snooze_secs: u64,
    /// Cadence front-ends tick the engine at.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_presets")]
    pub presets: Vec<PresetConfig>,
}

// Default functions
fn default_preset() -> PresetId {
    1
}
fn default_snooze_secs() -> u64 {
    5 * 60
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_presets() -> Vec<PresetConfig> {
    builtin_presets().iter().map(PresetConfig::from).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_preset: default_preset(),
            snooze_secs: default_snooze_secs(),
            tick_ms: default_tick_ms(),
            presets: default_presets(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = match current {
                serde_json::Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                other => other.get(part)?,
            };
        }
        Some(current)
    }

    /// Load from the default location, or return defaults if there is no
    /// file there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load from `path`, or return defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseFailed` for malformed TOML and
    /// `ConfigError::InvalidValue` for values [`Config::validate`] rejects.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(content).map_err(ConfigError::from)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Rejects zero `snooze_secs` or `tick_ms`, an invalid preset table, and
    /// a `default_preset` that is not in the table.
    pub fn validate(&self) -> Result<()> {
        if self.snooze_secs == 0 {
            return Err(invalid("snooze_secs", "must be greater than zero"));
        }
        if self.tick_ms == 0 {
            return Err(invalid("tick_ms", "must be greater than zero"));
        }
        let registry = self.registry()?;
        if !registry.contains(self.default_preset) {
            return Err(invalid(
                "default_preset",
                &format!("preset {} is not defined", self.default_preset),
            ));
        }
        Ok(())
    }

    /// Build the preset registry from the table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for duplicate ids or zero
    /// durations.
    pub fn registry(&self) -> Result<PresetRegistry> {
        PresetRegistry::new(self.presets.iter().map(Preset::from))
    }

    pub fn snooze(&self) -> Duration {
        Duration::from_secs(self.snooze_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Build an idle engine from this configuration.
    ///
    /// # Errors
    ///
    /// Returns any error [`Config::validate`] would.
    pub fn build_engine<S: DisplaySink>(&self, sink: S) -> Result<BreakEngine<S>> {
        BreakEngine::new(self.registry()?, self.default_preset, sink)?.with_snooze(self.snooze())
    }

    /// Get a config value as string by dot-separated key.
    ///
    /// Array elements are addressed by index, e.g. `presets.0.name`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

fn invalid(key: &str, message: &str) -> crate::error::CoreError {
    ConfigError::InvalidValue {
        key: key.into(),
        message: message.into(),
    }
    .into()
}
