use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use super::engine::{BreakEngine, EngineSnapshot, Transition};
use super::preset::PresetId;
use crate::error::{CoreError, Result};
use crate::sink::DisplaySink;

/// Mutex-guarded engine for callers that tick and forward intents from
/// different threads.
///
/// Each method takes the lock for exactly one engine operation, so ticks and
/// intents are applied in the order they acquire it and every intent sees
/// the state left by the preceding tick.
#[derive(Debug)]
pub struct SharedEngine<S: DisplaySink>(Mutex<BreakEngine<S>>);

impl<S: DisplaySink> SharedEngine<S> {
    pub fn new(engine: BreakEngine<S>) -> Self {
        Self(Mutex::new(engine))
    }

    fn lock(&self) -> Result<MutexGuard<'_, BreakEngine<S>>> {
        self.0.lock().map_err(|_| CoreError::Poisoned)
    }

    pub fn start(&self, now: Instant) -> Result<Option<Transition>> {
        Ok(self.lock()?.start(now))
    }

    pub fn on_tick(&self, now: Instant) -> Result<Option<Transition>> {
        Ok(self.lock()?.on_tick(now))
    }

    pub fn on_snooze(&self) -> Result<Option<Transition>> {
        Ok(self.lock()?.on_snooze())
    }

    pub fn on_skip(&self) -> Result<Option<Transition>> {
        Ok(self.lock()?.on_skip())
    }

    pub fn on_preset(&self, id: PresetId) -> Result<()> {
        self.lock()?.on_preset(id)
    }

    pub fn on_quit(&self) -> Result<Option<Transition>> {
        Ok(self.lock()?.on_quit())
    }

    pub fn snapshot(&self) -> Result<EngineSnapshot> {
        Ok(self.lock()?.snapshot())
    }

    pub fn into_inner(self) -> Result<BreakEngine<S>> {
        self.0.into_inner().map_err(|_| CoreError::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use crate::timer::{CyclePhase, PresetRegistry};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn shared() -> SharedEngine<RecordingSink> {
        let engine = BreakEngine::new(PresetRegistry::builtin(), 1, RecordingSink::new()).unwrap();
        SharedEngine::new(engine)
    }

    #[test]
    fn forwards_operations() {
        let engine = shared();
        let t0 = Instant::now();
        engine.start(t0).unwrap();
        engine.on_tick(t0 + Duration::from_secs(1500)).unwrap();
        assert_eq!(engine.snapshot().unwrap().state, CyclePhase::BreakActive);
        engine.on_snooze().unwrap();
        assert_eq!(engine.snapshot().unwrap().state, CyclePhase::Snoozed);
        engine.on_skip().unwrap();
        assert_eq!(engine.snapshot().unwrap().state, CyclePhase::Working);
        assert!(engine.on_preset(42).is_err());
        engine.on_quit().unwrap();
        assert_eq!(engine.snapshot().unwrap().state, CyclePhase::Idle);
    }

    #[test]
    fn intents_from_another_thread_are_serialized() {
        let engine = Arc::new(shared());
        let t0 = Instant::now();
        engine.start(t0).unwrap();

        let ticker = {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for s in 1..=100 {
                    engine.on_tick(t0 + Duration::from_secs(s)).unwrap();
                }
            })
        };
        let presets = {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for i in 0..100 {
                    engine.on_preset(if i % 2 == 0 { 2 } else { 1 }).unwrap();
                }
            })
        };
        ticker.join().unwrap();
        presets.join().unwrap();

        let engine = Arc::try_unwrap(engine).ok().unwrap().into_inner().unwrap();
        assert_eq!(engine.active_preset().id, 1);
        match engine.state() {
            crate::timer::CycleState::Working { elapsed, target } => assert!(elapsed <= target),
            crate::timer::CycleState::BreakActive { elapsed, target } => {
                assert!(elapsed <= target)
            }
            other => panic!("unexpected state {other:?}"),
        }
    }
}
