//! Hysteretic signal conditioner.
//!
//! A single threshold would chatter near the boundary under sensor noise;
//! the 30-count dead band between the low (530) and high (560) thresholds
//! absorbs that noise deterministically.  The conditioner is the only
//! mutator of the beam boolean, once per tick.

use log::info;

/// Pure hysteresis step: the conditioned value given the current code and
/// the previous conditioned value.
///
/// - `code >= high` from false → true
/// - `code <= low` from true → false
/// - strictly between the thresholds → hold `previous`
pub fn condition(code: u16, previous: bool, high: u16, low: u16) -> bool {
    if code >= high && !previous {
        true
    } else if code <= low && previous {
        false
    } else {
        previous
    }
}

/// Direction of a conditioned-signal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

/// Stateful wrapper holding the previous conditioned value and reporting
/// edges as they occur.
#[derive(Debug, Clone, Copy)]
pub struct BeamConditioner {
    high: u16,
    low: u16,
    beam_on: bool,
}

impl BeamConditioner {
    pub fn new(high: u16, low: u16) -> Self {
        Self {
            high,
            low,
            beam_on: false,
        }
    }

    /// Feed one ADC code.  Returns the edge if the conditioned signal
    /// changed this tick, `None` otherwise.
    pub fn update(&mut self, code: u16) -> Option<Edge> {
        let next = condition(code, self.beam_on, self.high, self.low);
        if next == self.beam_on {
            return None;
        }
        self.beam_on = next;
        let edge = if next { Edge::Rising } else { Edge::Falling };
        info!("High beam: {}", if next { "ON" } else { "OFF" });
        Some(edge)
    }

    /// Current conditioned beam signal.
    pub fn is_high(&self) -> bool {
        self.beam_on
    }

    /// Return to the initial (beam off) state.
    pub fn reset(&mut self) {
        self.beam_on = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIGH: u16 = 560;
    const LOW: u16 = 530;

    #[test]
    fn rises_only_at_high_threshold() {
        assert!(!condition(559, false, HIGH, LOW));
        assert!(condition(560, false, HIGH, LOW));
        assert!(condition(600, false, HIGH, LOW));
    }

    #[test]
    fn falls_only_at_low_threshold() {
        assert!(condition(531, true, HIGH, LOW));
        assert!(!condition(530, true, HIGH, LOW));
        assert!(!condition(500, true, HIGH, LOW));
    }

    #[test]
    fn dead_band_holds_previous() {
        for code in 531..560 {
            assert!(!condition(code, false, HIGH, LOW), "code {code} from false");
            assert!(condition(code, true, HIGH, LOW), "code {code} from true");
        }
    }

    #[test]
    fn conditioner_reports_edges_once() {
        let mut cond = BeamConditioner::new(HIGH, LOW);
        assert_eq!(cond.update(512), None);
        assert_eq!(cond.update(600), Some(Edge::Rising));
        assert_eq!(cond.update(600), None); // already on
        assert_eq!(cond.update(545), None); // dead band holds
        assert_eq!(cond.update(500), Some(Edge::Falling));
        assert_eq!(cond.update(500), None);
    }

    #[test]
    fn noise_inside_dead_band_never_chatters() {
        let mut cond = BeamConditioner::new(HIGH, LOW);
        let _ = cond.update(600);
        for code in [545, 555, 531, 559, 540] {
            assert_eq!(cond.update(code), None);
            assert!(cond.is_high());
        }
    }

    #[test]
    fn reset_returns_to_off() {
        let mut cond = BeamConditioner::new(HIGH, LOW);
        let _ = cond.update(600);
        cond.reset();
        assert!(!cond.is_high());
        // After reset, the next crossing is a fresh rising edge.
        assert_eq!(cond.update(600), Some(Edge::Rising));
    }
}
