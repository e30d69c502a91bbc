//! Indicator blink schedulers.
//!
//! Two independent periodic phase generators feed the panel LEDs:
//!
//! | Indicator | Meaning                  | Behaviour                        |
//! |-----------|--------------------------|----------------------------------|
//! | Output    | spotlight output active  | steady blink at 150 ms half-period |
//! | Flash     | gesture recently started | 100 ms blink, time-boxed to 3 s  |
//!
//! Both are pure functions of elapsed time and their own last-toggle
//! timestamp; they read nothing from the detector or gate beyond the
//! booleans that trigger them.

/// Blinks while the gated spotlight output is active; dark otherwise.
#[derive(Debug, Clone, Copy)]
pub struct OutputIndicator {
    interval_ms: u64,
    phase: bool,
    last_toggle_ms: u64,
}

impl OutputIndicator {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            phase: false,
            last_toggle_ms: 0,
        }
    }

    /// Advance one tick.  While `output_on` the phase toggles every
    /// interval; while off the phase is forced dark and the toggle timer
    /// is left alone.
    pub fn tick(&mut self, now: u64, output_on: bool) -> bool {
        if output_on {
            if now.saturating_sub(self.last_toggle_ms) >= self.interval_ms {
                self.phase = !self.phase;
                self.last_toggle_ms = now;
            }
        } else if self.phase {
            self.phase = false;
        }
        self.phase
    }

    pub fn phase(&self) -> bool {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = false;
        self.last_toggle_ms = 0;
    }
}

/// Time-boxed "flash gesture in progress" indicator.  Activated on the
/// first detected pulse, blinks fast for a fixed window, then goes dark
/// on its own — it reflects recent activity, not live detector state.
#[derive(Debug, Clone, Copy)]
pub struct FlashIndicator {
    duration_ms: u64,
    interval_ms: u64,
    active: bool,
    phase: bool,
    started_ms: u64,
    last_toggle_ms: u64,
}

impl FlashIndicator {
    pub fn new(duration_ms: u32, interval_ms: u32) -> Self {
        Self {
            duration_ms: u64::from(duration_ms),
            interval_ms: u64::from(interval_ms),
            active: false,
            phase: false,
            started_ms: 0,
            last_toggle_ms: 0,
        }
    }

    /// Start (or restart) the indicator window with the phase visible.
    pub fn activate(&mut self, now: u64) {
        self.active = true;
        self.started_ms = now;
        self.phase = true;
        self.last_toggle_ms = now;
    }

    /// Advance one tick: deactivate once the window elapses, otherwise
    /// toggle at the fast interval.
    pub fn tick(&mut self, now: u64) -> bool {
        if self.active {
            if now.saturating_sub(self.started_ms) >= self.duration_ms {
                self.active = false;
                self.phase = false;
            } else if now.saturating_sub(self.last_toggle_ms) >= self.interval_ms {
                self.phase = !self.phase;
                self.last_toggle_ms = now;
            }
        }
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> bool {
        self.phase
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.phase = false;
        self.started_ms = 0;
        self.last_toggle_ms = 0;
    }
}
