//! Controller service — the hexagonal core.
//!
//! [`ControllerService`] owns every domain component and runs the fixed
//! per-tick pipeline:
//!
//! ```text
//!  BeamSensePort ──▶ ┌──────────────────────────────────┐ ──▶ EventSink
//!                    │        ControllerService         │
//!     OutputPort ◀── │ conditioner → detector → deferred │
//!                    │ tasks → gate → indicators         │
//!                    └──────────────────────────────────┘
//! ```
//!
//! Each stage consumes the current tick's already-updated upstream value,
//! never a stale one.  All state mutation happens inside `tick()` or
//! `reset()`; no two ticks can interleave (single-threaded, cooperative).

use log::warn;

use crate::config::ControllerConfig;
use crate::detector::{FlashDetector, FlashEvent};
use crate::error::{Error, Result};
use crate::indicators::{FlashIndicator, OutputIndicator};
use crate::safety::SafetyGate;
use crate::scheduler::{DeferredScheduler, DeferredTask, TaskDelegate, TaskKind};
use crate::sensors::current::{Calibration, CurrentSensor};
use crate::sensors::hysteresis::{BeamConditioner, Edge};

use super::events::{ControllerEvent, StatusSnapshot};
use super::ports::{BeamSample, BeamSensePort, EventSink, OutputPort};

/// Bridges due scheduler tasks back onto the detector.  Split out as its
/// own struct so the scheduler and detector can be borrowed disjointly.
struct DetectorTaskDelegate<'a> {
    detector: &'a mut FlashDetector,
}

impl TaskDelegate for DetectorTaskDelegate<'_> {
    fn on_task_due(&mut self, _label: &'static str, kind: TaskKind) {
        match kind {
            TaskKind::ClearDetector => self.detector.clear(),
        }
    }
}

/// The controller service orchestrates all domain logic.
pub struct ControllerService {
    config: ControllerConfig,
    sensor: CurrentSensor,
    conditioner: BeamConditioner,
    detector: FlashDetector,
    gate: SafetyGate,
    output_indicator: OutputIndicator,
    flash_indicator: FlashIndicator,
    deferred: DeferredScheduler,
    /// Timestamp of the previous tick; `None` before the first tick and
    /// after a reset.
    last_tick_ms: Option<u64>,
    /// Last applied spotlight output, for change detection only — the
    /// output itself is always rederived through the gate.
    last_output: bool,
    tick_count: u64,
}

impl ControllerService {
    pub fn new(config: ControllerConfig) -> Self {
        let sensor = CurrentSensor::new(Calibration {
            zero_adc: config.adc_zero,
            counts_per_amp: config.adc_counts_per_amp,
        });
        let conditioner = BeamConditioner::new(config.threshold_high, config.threshold_low);
        let detector = FlashDetector::new(
            config.min_flash_ms,
            config.max_flash_ms,
            config.flash_timeout_ms,
        );
        let output_indicator = OutputIndicator::new(config.driver_led_interval_ms);
        let flash_indicator = FlashIndicator::new(
            config.flash_led_duration_ms,
            config.flash_led_interval_ms,
        );

        Self {
            config,
            sensor,
            conditioner,
            detector,
            gate: SafetyGate::new(),
            output_indicator,
            flash_indicator,
            deferred: DeferredScheduler::new(),
            last_tick_ms: None,
            last_output: false,
            tick_count: 0,
        }
    }

    /// Announce the service to its sink.  Call once before the first tick.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&ControllerEvent::Started);
    }

    /// Run one full control cycle.
    ///
    /// `now_ms` must come from a monotonic clock; a regressing timestamp
    /// returns [`Error::ClockRegression`] and leaves every component
    /// untouched.
    pub fn tick(
        &mut self,
        now_ms: u64,
        input: &mut impl BeamSensePort,
        hw: &mut impl OutputPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        if let Some(last) = self.last_tick_ms {
            if now_ms < last {
                warn!("Tick clock ran backwards: {now_ms}ms after {last}ms");
                return Err(Error::ClockRegression {
                    last_ms: last,
                    now_ms,
                });
            }
        }
        self.last_tick_ms = Some(now_ms);
        self.tick_count += 1;

        // 1. Sample and condition.
        let code = match input.sample() {
            BeamSample::Current(amps) => self.sensor.code(amps),
            // Simplified hosts: map the boolean straight onto the
            // thresholds so it still flows through the conditioner.
            BeamSample::Logic(true) => self.config.threshold_high,
            BeamSample::Logic(false) => self.config.threshold_low,
        };
        let edge = self.conditioner.update(code);
        if edge.is_some() {
            sink.emit(&ControllerEvent::BeamChanged(self.conditioner.is_high()));
        }

        // 2. Detector: this tick's edge, then timeout housekeeping.
        let edge_event = match edge {
            Some(Edge::Rising) => self.detector.on_rise(now_ms),
            Some(Edge::Falling) => self.detector.on_fall(now_ms),
            None => None,
        };
        if let Some(ev) = edge_event {
            self.handle_flash_event(ev, now_ms, sink);
        }
        if let Some(ev) = self.detector.poll_timeout(now_ms) {
            self.handle_flash_event(ev, now_ms, sink);
        }

        // 3. Deferred tasks (grace-delay detector clear).
        let mut delegate = DetectorTaskDelegate {
            detector: &mut self.detector,
        };
        self.deferred.tick(now_ms, &mut delegate);

        // 4. Safety gate — rederived every tick, never stored upstream.
        let output = self.gate.output(self.conditioner.is_high());
        if output != self.last_output {
            self.last_output = output;
            sink.emit(&ControllerEvent::OutputChanged(output));
        }

        // 5. Indicator schedulers.
        let output_phase = self.output_indicator.tick(now_ms, output);
        let flash_phase = self.flash_indicator.tick(now_ms);

        // 6. Apply outputs.
        hw.set_spotlight(output);
        hw.set_output_indicator(output_phase);
        hw.set_flash_indicator(flash_phase);

        Ok(())
    }

    /// Atomically return every component to its initial state, cancel all
    /// pending deferred tasks, and kill the outputs.  Idempotent.
    pub fn reset(&mut self, hw: &mut impl OutputPort, sink: &mut impl EventSink) {
        self.conditioner.reset();
        self.detector.clear();
        self.gate.reset();
        self.output_indicator.reset();
        self.flash_indicator.reset();
        self.deferred.cancel_all();
        self.last_tick_ms = None;
        self.last_output = false;
        self.tick_count = 0;
        hw.all_off();
        sink.emit(&ControllerEvent::Reset);
    }

    /// Externally visible signals, for status display.
    pub fn status(&self) -> StatusSnapshot {
        let beam_on = self.conditioner.is_high();
        StatusSnapshot {
            beam_on,
            aux_enabled: self.gate.is_enabled(),
            aux_output: self.gate.output(beam_on),
            pulse_count: self.detector.pulse_count(),
            output_indicator: self.output_indicator.phase(),
            flash_indicator: self.flash_indicator.phase(),
            tick_count: self.tick_count,
        }
    }

    /// Clone of the live configuration.
    pub fn current_config(&self) -> ControllerConfig {
        self.config.clone()
    }

    /// Deferred tasks currently pending (grace-delay clears).
    pub fn pending_deferred(&self) -> usize {
        self.deferred.pending()
    }

    // ── Internal ──────────────────────────────────────────────

    fn handle_flash_event(&mut self, ev: FlashEvent, now_ms: u64, sink: &mut impl EventSink) {
        match ev {
            FlashEvent::FirstPulse => {
                self.flash_indicator.activate(now_ms);
                sink.emit(&ControllerEvent::FirstFlash);
            }
            FlashEvent::DoubleFlash => {
                let enabled = self.gate.toggle();
                if self.config.clear_grace_ms == 0 {
                    self.detector.clear();
                } else {
                    let queued = self.deferred.schedule(DeferredTask {
                        label: "detector-clear",
                        due_ms: now_ms + u64::from(self.config.clear_grace_ms),
                        kind: TaskKind::ClearDetector,
                    });
                    if queued.is_none() {
                        warn!("Deferred detector clear dropped: scheduler full");
                        self.detector.clear();
                    }
                }
                sink.emit(&ControllerEvent::DoubleFlash { enabled });
            }
            FlashEvent::WindowRestarted => sink.emit(&ControllerEvent::WindowRestarted),
            FlashEvent::Disqualified => sink.emit(&ControllerEvent::GestureDisqualified),
            FlashEvent::TimedOut => sink.emit(&ControllerEvent::GestureTimedOut),
        }
    }
}
