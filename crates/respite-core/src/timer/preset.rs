use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError, Result};

pub type PresetId = u32;

/// A work/break cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: PresetId,
    #[serde(default)]
    pub name: String,
    #[serde(with = "secs")]
    pub work_duration: Duration,
    #[serde(with = "secs")]
    pub break_duration: Duration,
}

impl Preset {
    pub fn new(id: PresetId, name: impl Into<String>, work: Duration, brk: Duration) -> Self {
        Self {
            id,
            name: name.into(),
            work_duration: work,
            break_duration: brk,
        }
    }

    pub fn from_secs(id: PresetId, name: impl Into<String>, work_secs: u64, break_secs: u64) -> Self {
        Self::new(
            id,
            name,
            Duration::from_secs(work_secs),
            Duration::from_secs(break_secs),
        )
    }
}

/// Immutable lookup table of presets, keyed by id.
///
/// Built once at startup; the engine only ever reads from it.
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    presets: BTreeMap<PresetId, Preset>,
}

impl PresetRegistry {
    /// Build a registry, rejecting duplicate ids and zero durations.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty table, a repeated id,
    /// or a preset with a zero work or break duration.
    pub fn new(presets: impl IntoIterator<Item = Preset>) -> Result<Self> {
        let mut table = BTreeMap::new();
        for preset in presets {
            if preset.work_duration.is_zero() || preset.break_duration.is_zero() {
                return Err(invalid(format!(
                    "preset {} must have non-zero work and break durations",
                    preset.id
                )));
            }
            if table.contains_key(&preset.id) {
                return Err(invalid(format!("duplicate preset id {}", preset.id)));
            }
            table.insert(preset.id, preset);
        }
        if table.is_empty() {
            return Err(invalid("at least one preset is required".to_string()));
        }
        Ok(Self { presets: table })
    }

    /// The stock presets.
    pub fn builtin() -> Self {
        Self {
            presets: builtin_presets().into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::UnknownPreset` if `id` is not registered.
    pub fn lookup(&self, id: PresetId) -> Result<&Preset> {
        self.presets.get(&id).ok_or(CoreError::UnknownPreset { id })
    }

    pub fn contains(&self, id: PresetId) -> bool {
        self.presets.contains_key(&id)
    }

    /// Presets in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

pub(crate) fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::from_secs(1, "Pomodoro", 25 * 60, 5 * 60),
        Preset::from_secs(2, "Eye rest 20-20-20", 20 * 60, 20),
        Preset::from_secs(3, "Deep work", 50 * 60, 10 * 60),
    ]
}

fn invalid(message: String) -> CoreError {
    ConfigError::InvalidValue {
        key: "presets".into(),
        message,
    }
    .into()
}

/// Serialize durations as whole seconds.
mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
