//! Break-cycle engine.
//!
//! The engine is a timestamp-driven state machine. It does not use internal
//! threads or timers - the caller feeds it `on_tick(now)` at whatever cadence
//! it likes and forwards user intents as they arrive. Elapsed time is always
//! computed from timestamp deltas, so irregular tick spacing is fine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Working --(elapsed >= target)--> BreakActive
//!                    ^                                 |   |
//!                    +----(elapsed >= target / skip)---+   snooze
//!                    |                                     v
//!                    +-----------------skip------------ Snoozed
//!                                                          |
//!                  BreakActive <--(remaining == 0)---------+
//!
//! any live state --quit--> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = BreakEngine::new(PresetRegistry::builtin(), 1, sink)?;
//! engine.start(Instant::now());
//! // In a loop:
//! engine.on_tick(Instant::now());
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::display::{format_countdown, format_snooze, DisplaySnapshot};
use super::preset::{Preset, PresetId, PresetRegistry};
use crate::error::{ConfigError, Result};
use crate::sink::DisplaySink;

/// How long a snooze defers an active break unless configured otherwise.
pub const DEFAULT_SNOOZE: Duration = Duration::from_secs(5 * 60);

/// The current position in the work/break cycle.
///
/// `elapsed <= target` holds in `Working` and `BreakActive`; `remaining` is
/// never zero in `Snoozed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Working { elapsed: Duration, target: Duration },
    BreakActive { elapsed: Duration, target: Duration },
    Snoozed { remaining: Duration },
}

impl CycleState {
    pub fn phase(&self) -> CyclePhase {
        match self {
            CycleState::Idle => CyclePhase::Idle,
            CycleState::Working { .. } => CyclePhase::Working,
            CycleState::BreakActive { .. } => CyclePhase::BreakActive,
            CycleState::Snoozed { .. } => CyclePhase::Snoozed,
        }
    }

    /// Time left in the current countdown, if there is one.
    pub fn remaining(&self) -> Option<Duration> {
        match *self {
            CycleState::Idle => None,
            CycleState::Working { elapsed, target } | CycleState::BreakActive { elapsed, target } => {
                Some(target.saturating_sub(elapsed))
            }
            CycleState::Snoozed { remaining } => Some(remaining),
        }
    }
}

/// Payload-free discriminant of [`CycleState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    Idle,
    Working,
    BreakActive,
    Snoozed,
}

impl CyclePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            CyclePhase::Idle => "idle",
            CyclePhase::Working => "working",
            CyclePhase::BreakActive => "break_active",
            CyclePhase::Snoozed => "snoozed",
        }
    }
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state change performed by a tick or an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: CyclePhase,
    pub to: CyclePhase,
}

/// Serializable view of the engine for status output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    pub state: CyclePhase,
    pub active_preset: PresetId,
    pub remaining_ms: Option<u64>,
    pub overlay_visible: bool,
    pub display_text: Option<String>,
}

/// Core break-cycle engine.
///
/// Owns the cycle state and its display sink. Every operation is synchronous
/// and constant-time; callers on more than one thread should go through
/// [`SharedEngine`](super::SharedEngine).
#[derive(Debug)]
pub struct BreakEngine<S: DisplaySink> {
    registry: PresetRegistry,
    active: Preset,
    snooze: Duration,
    state: CycleState,
    /// Latest tick timestamp seen. Never moves backwards.
    last_tick: Option<Instant>,
    sink: S,
}

impl<S: DisplaySink> BreakEngine<S> {
    /// Create an engine in `Idle` with `default_preset` active.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownPreset` if `default_preset` is not in the
    /// registry.
    pub fn new(registry: PresetRegistry, default_preset: PresetId, sink: S) -> Result<Self> {
        let active = registry.lookup(default_preset)?.clone();
        Ok(Self {
            registry,
            active,
            snooze: DEFAULT_SNOOZE,
            state: CycleState::Idle,
            last_tick: None,
            sink,
        })
    }

    /// Override the snooze length.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero duration.
    pub fn with_snooze(mut self, snooze: Duration) -> Result<Self> {
        if snooze.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "snooze_secs".into(),
                message: "must be greater than zero".into(),
            }
            .into());
        }
        self.snooze = snooze;
        Ok(self)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn phase(&self) -> CyclePhase {
        self.state.phase()
    }

    pub fn active_preset(&self) -> &Preset {
        &self.active
    }

    pub fn snooze_duration(&self) -> Duration {
        self.snooze
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.state.remaining()
    }

    pub fn last_tick(&self) -> Option<Instant> {
        self.last_tick
    }

    /// The overlay is up exactly while a break is active.
    pub fn overlay_visible(&self) -> bool {
        matches!(self.state, CycleState::BreakActive { .. })
    }

    pub fn display(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            text: self.readout(),
            overlay_visible: self.overlay_visible(),
        }
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.phase(),
            active_preset: self.active.id,
            remaining_ms: self.remaining().map(saturating_millis),
            overlay_visible: self.overlay_visible(),
            display_text: self.readout(),
        }
    }

    pub fn registry(&self) -> &PresetRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ── Driver ───────────────────────────────────────────────────────

    /// Leave `Idle` and begin the first work interval.
    ///
    /// No-op outside `Idle`.
    pub fn start(&mut self, now: Instant) -> Option<Transition> {
        if self.state != CycleState::Idle {
            return None;
        }
        self.last_tick = Some(self.last_tick.map_or(now, |last| last.max(now)));
        let from = self.phase();
        self.state = CycleState::Working {
            elapsed: Duration::ZERO,
            target: self.active.work_duration,
        };
        self.emit_readout();
        Some(self.log_transition(from))
    }

    /// Advance the cycle to `now`.
    ///
    /// At most one transition happens per tick; time past the crossed target
    /// is dropped and the next phase starts from zero.
    pub fn on_tick(&mut self, now: Instant) -> Option<Transition> {
        let delta = self.advance_clock(now);
        match self.state {
            CycleState::Idle => None,
            CycleState::Working { elapsed, target } => {
                let elapsed = elapsed.saturating_add(delta);
                if elapsed >= target {
                    Some(self.begin_break())
                } else {
                    self.state = CycleState::Working { elapsed, target };
                    self.emit_readout();
                    None
                }
            }
            CycleState::BreakActive { elapsed, target } => {
                let elapsed = elapsed.saturating_add(delta);
                if elapsed >= target {
                    Some(self.begin_work())
                } else {
                    self.state = CycleState::BreakActive { elapsed, target };
                    self.emit_readout();
                    None
                }
            }
            CycleState::Snoozed { remaining } => {
                let remaining = remaining.saturating_sub(delta);
                if remaining.is_zero() {
                    Some(self.begin_break())
                } else {
                    self.state = CycleState::Snoozed { remaining };
                    self.emit_readout();
                    None
                }
            }
        }
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Defer the active break. No-op outside `BreakActive`.
    pub fn on_snooze(&mut self) -> Option<Transition> {
        if !matches!(self.state, CycleState::BreakActive { .. }) {
            trace!(state = ?self.phase(), "snooze ignored");
            return None;
        }
        let from = self.phase();
        self.state = CycleState::Snoozed {
            remaining: self.snooze,
        };
        self.sink.set_overlay_visible(false);
        self.emit_readout();
        Some(self.log_transition(from))
    }

    /// End the break or snooze and go back to work. No-op while `Working`
    /// or `Idle`.
    pub fn on_skip(&mut self) -> Option<Transition> {
        match self.state {
            CycleState::BreakActive { .. } | CycleState::Snoozed { .. } => Some(self.begin_work()),
            CycleState::Working { .. } | CycleState::Idle => {
                trace!(state = ?self.phase(), "skip ignored");
                None
            }
        }
    }

    /// Switch the active preset.
    ///
    /// A running work interval or break is rescaled to the new preset's
    /// duration with its elapsed time kept, clamped so it never exceeds the
    /// new target. A clamped interval ends on the following tick.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownPreset` without touching any state if `id`
    /// is not registered.
    pub fn on_preset(&mut self, id: PresetId) -> Result<()> {
        let preset = match self.registry.lookup(id) {
            Ok(p) => p.clone(),
            Err(e) => {
                warn!(preset = id, "rejected unknown preset");
                return Err(e);
            }
        };
        debug!(from = self.active.id, to = preset.id, "preset changed");
        self.active = preset;

        match self.state {
            CycleState::Working { elapsed, .. } => {
                let target = self.active.work_duration;
                self.state = CycleState::Working {
                    elapsed: elapsed.min(target),
                    target,
                };
                self.emit_readout();
            }
            CycleState::BreakActive { elapsed, .. } => {
                let target = self.active.break_duration;
                self.state = CycleState::BreakActive {
                    elapsed: elapsed.min(target),
                    target,
                };
                self.emit_readout();
            }
            CycleState::Snoozed { .. } | CycleState::Idle => {}
        }
        Ok(())
    }

    /// Stop the cycle. No-op when already `Idle`.
    pub fn on_quit(&mut self) -> Option<Transition> {
        if self.state == CycleState::Idle {
            return None;
        }
        let from = self.phase();
        self.state = CycleState::Idle;
        self.sink.set_overlay_visible(false);
        Some(self.log_transition(from))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance_clock(&mut self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) if now < last => {
                warn!(
                    behind_ms = saturating_millis(last - now),
                    "tick timestamp went backwards; treating as zero advance"
                );
                Duration::ZERO
            }
            Some(last) => {
                self.last_tick = Some(now);
                now - last
            }
            None => {
                self.last_tick = Some(now);
                Duration::ZERO
            }
        }
    }

    fn begin_break(&mut self) -> Transition {
        let from = self.phase();
        self.state = CycleState::BreakActive {
            elapsed: Duration::ZERO,
            target: self.active.break_duration,
        };
        self.sink.set_overlay_visible(true);
        self.emit_readout();
        self.log_transition(from)
    }

    fn begin_work(&mut self) -> Transition {
        let from = self.phase();
        self.state = CycleState::Working {
            elapsed: Duration::ZERO,
            target: self.active.work_duration,
        };
        self.sink.set_overlay_visible(false);
        self.emit_readout();
        self.log_transition(from)
    }

    fn readout(&self) -> Option<String> {
        match self.state {
            CycleState::Idle => None,
            CycleState::Snoozed { remaining } => Some(format_snooze(remaining)),
            CycleState::Working { .. } | CycleState::BreakActive { .. } => {
                self.remaining().map(format_countdown)
            }
        }
    }

    fn emit_readout(&mut self) {
        if let Some(text) = self.readout() {
            trace!(%text, "display");
            self.sink.set_display_text(&text);
        }
    }

    fn log_transition(&self, from: CyclePhase) -> Transition {
        let to = self.phase();
        debug!(?from, ?to, preset = self.active.id, "cycle transition");
        Transition { from, to }
    }
}

fn saturating_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
