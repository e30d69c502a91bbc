//! KnightDriver host simulator — main entry point.
//!
//! Wires host adapters around the controller core and replays a scripted
//! current profile through one full session: high beam on, a double
//! flash (spotlight enabled), a stretch of driving, beam off (interlock
//! drops the spotlight), and another double flash to disable.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                Adapters (outer ring)                 │
//! │                                                      │
//! │  ScriptedCurrent   ConsoleOutputs   LogEventSink     │
//! │  (BeamSensePort)   (OutputPort)     (EventSink)      │
//! │                                                      │
//! │  ────────────── Port Trait Boundary ──────────────   │
//! │                                                      │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │        ControllerService (pure logic)          │  │
//! │  │  conditioner · detector · gate · indicators    │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use log::info;

use knightdriver::app::events::ControllerEvent;
use knightdriver::app::ports::{BeamSample, BeamSensePort, EventSink, OutputPort};
use knightdriver::app::service::ControllerService;
use knightdriver::config::ControllerConfig;
use knightdriver::display::status_lines;

// ── Adapters ──────────────────────────────────────────────────

/// Replays a pre-built per-tick current profile (amps).
struct ScriptedCurrent {
    profile: Vec<f32>,
    idx: usize,
}

impl ScriptedCurrent {
    fn new(profile: Vec<f32>) -> Self {
        Self { profile, idx: 0 }
    }

    fn finished(&self) -> bool {
        self.idx >= self.profile.len()
    }
}

impl BeamSensePort for ScriptedCurrent {
    fn sample(&mut self) -> BeamSample {
        let amps = self.profile.get(self.idx).copied().unwrap_or(0.0);
        self.idx += 1;
        BeamSample::Current(amps)
    }
}

/// Logs output transitions; a real build would drive GPIO here.
#[derive(Default)]
struct ConsoleOutputs {
    spotlight: bool,
}

impl OutputPort for ConsoleOutputs {
    fn set_spotlight(&mut self, on: bool) {
        if on != self.spotlight {
            self.spotlight = on;
            info!("Spotlight relay: {}", if on { "ON" } else { "OFF" });
        }
    }

    fn set_output_indicator(&mut self, _on: bool) {}

    fn set_flash_indicator(&mut self, _on: bool) {}

    fn all_off(&mut self) {
        self.spotlight = false;
    }
}

/// Forwards controller events to the log.
struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControllerEvent) {
        info!("event: {event:?}");
    }
}

// ── Script construction ───────────────────────────────────────

/// Hold `amps` for `ms` milliseconds worth of ticks.
fn hold(profile: &mut Vec<f32>, amps: f32, ms: u32, tick_ms: u32) {
    let ticks = (ms / tick_ms).max(1);
    profile.extend(std::iter::repeat_n(amps, ticks as usize));
}

fn build_script(tick_ms: u32) -> Vec<f32> {
    const BEAM_AMPS: f32 = 4.0;
    let mut p = Vec::new();

    hold(&mut p, 0.0, 500, tick_ms); // quiescent
    hold(&mut p, BEAM_AMPS, 600, tick_ms); // high beam on
    hold(&mut p, 0.0, 200, tick_ms); // flick off (qualifying flash)
    hold(&mut p, BEAM_AMPS, 300, tick_ms); // back on — flash 1
    hold(&mut p, 0.0, 200, tick_ms); // flick off again
    hold(&mut p, BEAM_AMPS, 2000, tick_ms); // flash 2 — spotlight enabled
    hold(&mut p, 0.0, 1500, tick_ms); // beam off — interlock drops output
    hold(&mut p, BEAM_AMPS, 500, tick_ms); // beam back on — spotlight re-lit
    hold(&mut p, 0.0, 300, tick_ms); // session end
    p
}

// ── Entry point ───────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ControllerConfig::default();
    config.validate()?;
    let tick_ms = config.tick_interval_ms;

    let mut service = ControllerService::new(config);
    let mut input = ScriptedCurrent::new(build_script(tick_ms));
    let mut outputs = ConsoleOutputs::default();
    let mut sink = LogEventSink;

    info!("KNIGHTDRIVER simulation started ({tick_ms}ms ticks)");
    service.start(&mut sink);

    let mut now_ms: u64 = 0;
    let mut last_lcd = (String::new(), String::new());
    while !input.finished() {
        service.tick(now_ms, &mut input, &mut outputs, &mut sink)?;

        let lcd = status_lines(&service.status());
        if lcd != last_lcd {
            info!("LCD | {} | {} |", lcd.0, lcd.1);
            last_lcd = lcd;
        }

        now_ms += u64::from(tick_ms);
    }

    let status = service.status();
    info!(
        "Simulation complete after {} ticks (enabled={}, output={})",
        status.tick_count, status.aux_enabled, status.aux_output
    );
    Ok(())
}
