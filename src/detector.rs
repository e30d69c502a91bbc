//! Double-flash gesture detector.
//!
//! A temporal state machine over rising/falling edges of the conditioned
//! high-beam signal:
//!
//! ```text
//!  IDLE (0 pulses) ──[qualifying rise]──▶ ARMED (1 pulse)
//!     ▲                                       │
//!     │          [second qualifying rise      │
//!     │           within flash_timeout]       │
//!     ├──────────── TRIGGERED ◀───────────────┤
//!     │         (toggle, then clear)          │
//!     │                                       │
//!     └──[timeout / too-long hold]────────────┘
//! ```
//!
//! A rise qualifies as a flash pulse only if the preceding off-duration
//! falls in `[min_flash_ms, max_flash_ms]` — faster is switch bounce,
//! slower is two unrelated activations.  A fall after an on-duration
//! beyond `max_flash_ms` means the beam was in normal sustained use, not
//! flashing, and disqualifies the gesture in progress.  An armed gesture
//! whose window expires restarts from the late rise instead of discarding
//! it, tolerating a single false-start pulse.

use log::info;

/// Outcome of feeding an edge or a timeout poll to the detector.
/// These are expected control-flow results, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashEvent {
    /// First qualifying pulse recognised; gesture armed.
    FirstPulse,
    /// Second qualifying pulse within the window — the caller must toggle
    /// the enable latch and then clear (or defer-clear) the detector.
    DoubleFlash,
    /// Second pulse arrived after the window expired; treated as a fresh
    /// first pulse rather than discarding the gesture.
    WindowRestarted,
    /// On-duration exceeded `max_flash_ms`: sustained beam use, gesture
    /// disqualified and state cleared.
    Disqualified,
    /// Armed gesture abandoned: no second pulse within `flash_timeout_ms`.
    TimedOut,
}

/// The flash-pattern state machine.  Owns all gesture bookkeeping; the
/// caller owns the clock and feeds millisecond timestamps.
#[derive(Debug, Clone, Copy)]
pub struct FlashDetector {
    pulse_count: u8,
    first_pulse_at: Option<u64>,
    last_rise_at: Option<u64>,
    last_fall_at: Option<u64>,
    min_flash_ms: u64,
    max_flash_ms: u64,
    flash_timeout_ms: u64,
}

impl FlashDetector {
    pub fn new(min_flash_ms: u32, max_flash_ms: u32, flash_timeout_ms: u32) -> Self {
        Self {
            pulse_count: 0,
            first_pulse_at: None,
            last_rise_at: None,
            last_fall_at: None,
            min_flash_ms: u64::from(min_flash_ms),
            max_flash_ms: u64::from(max_flash_ms),
            flash_timeout_ms: u64::from(flash_timeout_ms),
        }
    }

    /// Feed a rising edge at time `now` (ms).
    pub fn on_rise(&mut self, now: u64) -> Option<FlashEvent> {
        self.last_rise_at = Some(now);

        // First-ever activation cannot be a flash: no prior fall recorded.
        let fall = self.last_fall_at?;

        let off_duration = now.saturating_sub(fall);
        if off_duration < self.min_flash_ms || off_duration > self.max_flash_ms {
            return None; // Bounce or unrelated re-activation.
        }

        match self.pulse_count {
            0 => {
                self.pulse_count = 1;
                self.first_pulse_at = Some(now);
                info!("Flash 1 detected (off {off_duration}ms)");
                Some(FlashEvent::FirstPulse)
            }
            1 => {
                let first = self.first_pulse_at?;
                let since_first = now.saturating_sub(first);
                if since_first <= self.flash_timeout_ms {
                    self.pulse_count = 2;
                    info!("Flash 2 detected - DOUBLE FLASH ({since_first}ms since first)");
                    Some(FlashEvent::DoubleFlash)
                } else {
                    // Window expired — this rise starts a new gesture.
                    self.first_pulse_at = Some(now);
                    info!("Flash window expired - restarting as flash 1");
                    Some(FlashEvent::WindowRestarted)
                }
            }
            // Grace window after a completed gesture: extra pulses are
            // absorbed until the deferred clear runs.
            _ => None,
        }
    }

    /// Feed a falling edge at time `now` (ms).
    pub fn on_fall(&mut self, now: u64) -> Option<FlashEvent> {
        let prev_rise = self.last_rise_at;
        self.last_fall_at = Some(now);

        if self.pulse_count > 0 {
            if let Some(rise) = prev_rise {
                let on_duration = now.saturating_sub(rise);
                if on_duration > self.max_flash_ms {
                    info!("High beam held {on_duration}ms - not a flash, resetting");
                    self.clear();
                    return Some(FlashEvent::Disqualified);
                }
            }
        }
        None
    }

    /// Per-tick timeout housekeeping, independent of edges.
    pub fn poll_timeout(&mut self, now: u64) -> Option<FlashEvent> {
        if self.pulse_count == 0 {
            return None;
        }
        let first = self.first_pulse_at?;
        if now.saturating_sub(first) > self.flash_timeout_ms {
            info!("Flash timeout - resetting");
            self.clear();
            return Some(FlashEvent::TimedOut);
        }
        None
    }

    /// Return to IDLE: all-zero/None gesture state.
    pub fn clear(&mut self) {
        self.pulse_count = 0;
        self.first_pulse_at = None;
        self.last_rise_at = None;
        self.last_fall_at = None;
    }

    /// Pulses recognised in the gesture in progress (0, 1, or 2).
    pub fn pulse_count(&self) -> u8 {
        self.pulse_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> FlashDetector {
        FlashDetector::new(100, 2000, 3000)
    }

    #[test]
    fn first_ever_rise_is_not_a_pulse() {
        let mut det = detector();
        assert_eq!(det.on_rise(1000), None);
        assert_eq!(det.pulse_count(), 0);
    }

    #[test]
    fn qualifying_off_duration_arms() {
        let mut det = detector();
        let _ = det.on_rise(1000);
        let _ = det.on_fall(1500);
        assert_eq!(det.on_rise(1650), Some(FlashEvent::FirstPulse)); // off 150ms
        assert_eq!(det.pulse_count(), 1);
    }

    #[test]
    fn bounce_is_ignored() {
        let mut det = detector();
        let _ = det.on_rise(1000);
        let _ = det.on_fall(1500);
        assert_eq!(det.on_rise(1550), None); // off 50ms < 100ms
        assert_eq!(det.pulse_count(), 0);
    }

    #[test]
    fn too_long_gap_is_ignored() {
        let mut det = detector();
        let _ = det.on_rise(1000);
        let _ = det.on_fall(1500);
        assert_eq!(det.on_rise(4000), None); // off 2500ms > 2000ms
        assert_eq!(det.pulse_count(), 0);
    }

    #[test]
    fn double_flash_within_window_triggers() {
        let mut det = detector();
        let _ = det.on_rise(0);
        let _ = det.on_fall(500);
        assert_eq!(det.on_rise(650), Some(FlashEvent::FirstPulse));
        let _ = det.on_fall(950);
        assert_eq!(det.on_rise(1100), Some(FlashEvent::DoubleFlash)); // 450ms since first
        assert_eq!(det.pulse_count(), 2);
    }

    #[test]
    fn second_pulse_after_window_restarts() {
        let mut det = detector();
        let _ = det.on_rise(0);
        let _ = det.on_fall(500);
        let _ = det.on_rise(650); // pulse 1 at t=650
        let _ = det.on_fall(950);
        // Second qualifying rise, but 3850ms after the first pulse.
        // (Note: poll_timeout would normally clear first; this exercises
        // the edge path directly.)
        assert_eq!(det.on_rise(4500), None); // off 3550ms > max — ignored
        let _ = det.on_fall(4600);
        assert_eq!(det.on_rise(4750), Some(FlashEvent::WindowRestarted));
        assert_eq!(det.pulse_count(), 1);
    }

    #[test]
    fn sustained_hold_disqualifies() {
        let mut det = detector();
        let _ = det.on_rise(0);
        let _ = det.on_fall(500);
        let _ = det.on_rise(650); // pulse 1
        assert_eq!(det.on_fall(3200), Some(FlashEvent::Disqualified)); // on 2550ms
        assert_eq!(det.pulse_count(), 0);
        assert_eq!(det.poll_timeout(10_000), None); // state fully cleared
    }

    #[test]
    fn stale_gesture_times_out() {
        let mut det = detector();
        let _ = det.on_rise(0);
        let _ = det.on_fall(500);
        let _ = det.on_rise(650); // pulse 1
        let _ = det.on_fall(950);
        assert_eq!(det.poll_timeout(3650), None); // 3000ms window not yet over
        assert_eq!(det.poll_timeout(3700), Some(FlashEvent::TimedOut));
        assert_eq!(det.pulse_count(), 0);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut det = detector();
        let _ = det.on_rise(0);
        let _ = det.on_fall(500);
        let _ = det.on_rise(650);
        det.clear();
        let snapshot = det;
        det.clear();
        assert_eq!(det.pulse_count(), snapshot.pulse_count());
        assert_eq!(det.on_rise(700), None); // no prior fall after clear
    }

    #[test]
    fn extra_pulse_during_grace_window_is_absorbed() {
        let mut det = detector();
        let _ = det.on_rise(0);
        let _ = det.on_fall(500);
        let _ = det.on_rise(650);
        let _ = det.on_fall(950);
        let _ = det.on_rise(1100); // double flash, pulse_count = 2
        let _ = det.on_fall(1300);
        assert_eq!(det.on_rise(1450), None); // absorbed until clear
        assert_eq!(det.pulse_count(), 2);
    }
}
