mod display;
mod engine;
mod preset;
mod shared;

pub use display::{format_countdown, format_snooze, DisplaySnapshot};
pub use engine::{
    BreakEngine, CyclePhase, CycleState, EngineSnapshot, Transition, DEFAULT_SNOOZE,
};
pub use preset::{Preset, PresetId, PresetRegistry};
pub(crate) use preset::builtin_presets;
pub use shared::SharedEngine;
