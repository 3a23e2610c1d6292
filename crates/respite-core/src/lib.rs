//! # Respite Core Library
//!
//! Scheduling core for a periodic "take a break" reminder. The engine decides
//! when work intervals end and breaks begin, and how snoozing, skipping and
//! preset changes interact with a running countdown. It never renders
//! anything or owns an event loop: a front-end drives it with ticks, forwards
//! user intents, and receives overlay and readout updates through a
//! [`DisplaySink`].
//!
//! ## Key Components
//!
//! - [`BreakEngine`]: the cycle state machine
//! - [`PresetRegistry`]: immutable table of work/break cadences
//! - [`SharedEngine`]: mutex-guarded engine for multi-threaded front-ends
//! - [`Config`]: TOML configuration (presets, snooze length, tick cadence)

pub mod error;
pub mod events;
pub mod sink;
pub mod storage;
pub mod testing;
pub mod timer;

pub use error::{ConfigError, CoreError};
pub use events::Signal;
pub use sink::{DisplaySink, NullSink};
pub use storage::Config;
pub use timer::{
    BreakEngine, CyclePhase, CycleState, EngineSnapshot, Preset, PresetId, PresetRegistry,
    SharedEngine, Transition,
};
