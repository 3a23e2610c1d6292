//! Live break cycle in the terminal.
//!
//! A tokio interval task ticks the engine from the wall clock while the main
//! task reads intents from stdin. Both go through [`SharedEngine`], so every
//! intent is applied against the state left by the latest tick.

use std::ops::ControlFlow;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use respite_core::{CoreError, PresetId, SharedEngine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::intent::Intent;
use crate::terminal::TerminalSink;

#[derive(Args)]
pub struct RunArgs {
    /// Preset to start with (defaults to the configured default)
    #[arg(long)]
    preset: Option<PresetId>,
    /// Tick interval in milliseconds (defaults to the configured tick_ms)
    #[arg(long)]
    tick_ms: Option<u64>,
}

pub fn run(config: Option<&Path>, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config)?;
    let mut engine = config.build_engine(TerminalSink)?;
    if let Some(id) = args.preset {
        engine.on_preset(id)?;
    }
    let tick = match args.tick_ms {
        Some(0) => return Err("--tick-ms must be greater than zero".into()),
        Some(ms) => Duration::from_millis(ms),
        None => config.tick_interval(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run_loop(Arc::new(SharedEngine::new(engine)), tick));
    // Don't wait on a stdin read that may still be blocked in the pool.
    runtime.shutdown_background();
    result
}

async fn run_loop(
    engine: Arc<SharedEngine<TerminalSink>>,
    tick: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    engine.start(Instant::now())?;

    let ticker = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if let Err(e) = engine.on_tick(Instant::now()) {
                    warn!(error = %e, "ticker stopped");
                    break;
                }
            }
        })
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Intent>() {
            Ok(intent) => {
                if dispatch(&engine, intent)?.is_break() {
                    break;
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    debug!("leaving run loop");
    ticker.abort();
    engine.on_quit()?;
    Ok(())
}

/// Apply one intent. `Break` means the user asked to quit; the caller winds
/// the loop down and quits the engine.
fn dispatch(
    engine: &SharedEngine<TerminalSink>,
    intent: Intent,
) -> Result<ControlFlow<()>, Box<dyn std::error::Error>> {
    match intent {
        Intent::Snooze => {
            if engine.on_snooze()?.is_none() {
                eprintln!("nothing to snooze: no break is active");
            }
        }
        Intent::Skip => {
            if engine.on_skip()?.is_none() {
                eprintln!("nothing to skip: no break is active");
            }
        }
        Intent::Preset(id) => match engine.on_preset(id) {
            Ok(()) => {}
            Err(e @ CoreError::UnknownPreset { .. }) => eprintln!("error: {e}"),
            Err(e) => return Err(e.into()),
        },
        Intent::Status => {
            let snapshot = engine.snapshot()?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Intent::Quit => return Ok(ControlFlow::Break(())),
    }
    Ok(ControlFlow::Continue(()))
}
