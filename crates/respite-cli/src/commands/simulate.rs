//! Deterministic runs against a synthetic clock.

use std::collections::VecDeque;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use clap::Args;
use respite_core::testing::RecordingSink;
use respite_core::{BreakEngine, PresetId, Signal};
use serde::Serialize;

use crate::intent::Intent;

#[derive(Args)]
pub struct SimulateArgs {
    /// Preset to start with (defaults to the configured default)
    #[arg(long)]
    preset: Option<PresetId>,
    /// Simulated run length in seconds
    #[arg(long)]
    seconds: u64,
    /// Seconds between ticks
    #[arg(long, default_value = "1")]
    step: u64,
    /// Scripted intent as SECS:INTENT, e.g. "1500:snooze" or "30:preset 2"
    #[arg(long = "at")]
    script: Vec<Scripted>,
    /// Print JSON lines instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone)]
struct Scripted {
    at: u64,
    intent: Intent,
}

impl FromStr for Scripted {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (at, intent) = s
            .split_once(':')
            .ok_or_else(|| format!("expected SECS:INTENT, got '{s}'"))?;
        let at = at
            .trim()
            .parse()
            .map_err(|_| format!("invalid offset '{at}'"))?;
        let intent = intent.parse().map_err(|e| format!("{e}"))?;
        Ok(Self { at, intent })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Line<'a> {
    Signal { at_secs: u64, signal: &'a Signal },
    Snapshot { at_secs: u64, snapshot: respite_core::EngineSnapshot },
}

struct Simulation {
    engine: BreakEngine<RecordingSink>,
    t0: Instant,
    json: bool,
}

impl Simulation {
    fn flush(&mut self, at_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
        for signal in self.engine.sink_mut().drain() {
            if self.json {
                let line = Line::Signal { at_secs, signal: &signal };
                println!("{}", serde_json::to_string(&line)?);
            } else {
                let text = match &signal {
                    Signal::OverlayVisible(true) => "overlay shown",
                    Signal::OverlayVisible(false) => "overlay hidden",
                    Signal::DisplayText(text) => text.as_str(),
                };
                println!("{at_secs:>7}s  {text}");
            }
        }
        Ok(())
    }

    fn status(&self, at_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
        let snapshot = self.engine.snapshot();
        if self.json {
            let line = Line::Snapshot { at_secs, snapshot };
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!(
                "{at_secs:>7}s  [{} preset={} readout={}]",
                snapshot.state,
                snapshot.active_preset,
                snapshot.display_text.as_deref().unwrap_or("-"),
            );
        }
        Ok(())
    }

    fn apply(&mut self, at_secs: u64, intent: Intent) -> Result<(), Box<dyn std::error::Error>> {
        match intent {
            Intent::Snooze => {
                self.engine.on_snooze();
            }
            Intent::Skip => {
                self.engine.on_skip();
            }
            Intent::Preset(id) => self.engine.on_preset(id)?,
            Intent::Quit => {
                self.engine.on_quit();
            }
            Intent::Status => return self.status(at_secs),
        }
        self.flush(at_secs)
    }

    fn tick(&mut self, at_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
        let now = offset(self.t0, at_secs)?;
        self.engine.on_tick(now);
        self.flush(at_secs)
    }
}

fn offset(t0: Instant, secs: u64) -> Result<Instant, String> {
    t0.checked_add(Duration::from_secs(secs))
        .ok_or_else(|| format!("{secs}s is too far ahead to simulate"))
}

pub fn run(config: Option<&Path>, args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.step == 0 {
        return Err("--step must be greater than zero".into());
    }
    let mut script = args.script;
    if let Some(late) = script.iter().find(|s| s.at > args.seconds) {
        return Err(format!("scripted intent at {}s is past the end of the run", late.at).into());
    }
    script.sort_by_key(|s| s.at);
    let mut script: VecDeque<Scripted> = script.into();

    let config = super::load_config(config)?;
    let mut engine = config.build_engine(RecordingSink::new())?;
    if let Some(id) = args.preset {
        engine.on_preset(id)?;
    }

    let t0 = Instant::now();
    offset(t0, args.seconds)?;
    engine.start(t0);
    let mut sim = Simulation {
        engine,
        t0,
        json: args.json,
    };
    sim.flush(0)?;

    // Intents strictly between two ticks see the state of the earlier tick;
    // one scheduled exactly on a tick runs after it.
    let mut now = 0;
    while now < args.seconds {
        let next = now.saturating_add(args.step).min(args.seconds);
        while let Some(s) = script.front().filter(|s| s.at < next) {
            let (at, intent) = (s.at, s.intent);
            script.pop_front();
            sim.apply(at, intent)?;
        }
        sim.tick(next)?;
        now = next;
    }
    while let Some(s) = script.pop_front() {
        sim.apply(s.at, s.intent)?;
    }

    sim.status(args.seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scripted_intents() {
        let s: Scripted = "1500:snooze".parse().unwrap();
        assert_eq!(s.at, 1500);
        assert_eq!(s.intent, Intent::Snooze);

        let s: Scripted = "30:preset 2".parse().unwrap();
        assert_eq!(s.intent, Intent::Preset(2));
    }

    #[test]
    fn offset_rejects_unrepresentable_instants() {
        let t0 = Instant::now();
        assert_eq!(offset(t0, 60).unwrap(), t0 + Duration::from_secs(60));
        assert!(offset(t0, u64::MAX).is_err());
    }

    #[test]
    fn rejects_malformed_script() {
        assert!("snooze".parse::<Scripted>().is_err());
        assert!("x:snooze".parse::<Scripted>().is_err());
        assert!("10:nap".parse::<Scripted>().is_err());
    }
}
