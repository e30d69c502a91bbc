//! Safety-interlocked spotlight gate.
//!
//! The spotlight output is never stored: it is recomputed on demand as
//! `beam_on && enabled`, so the hard interlock — auxiliary light only
//! while the operator is actively signalling with the high beam — holds
//! at every observable instant regardless of the latched enable flag.
//! No other code path may produce the output.

use log::info;

/// Latched enable flag plus the stateless interlock derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyGate {
    enabled: bool,
}

impl SafetyGate {
    pub fn new() -> Self {
        Self { enabled: false }
    }

    /// Toggle the enable latch.  Called only on a recognised double
    /// flash.  Returns the new latch value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        info!(
            "Spotlight {}",
            if self.enabled { "ENABLED" } else { "DISABLED" }
        );
        self.enabled
    }

    /// The interlocked output: load-bearing only while the high beam is on.
    pub fn output(&self, beam_on: bool) -> bool {
        beam_on && self.enabled
    }

    /// Current latch value (independent of the live beam signal).
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Drop the latch back to disabled.
    pub fn reset(&mut self) {
        self.enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_requires_both_latch_and_beam() {
        let mut gate = SafetyGate::new();
        assert!(!gate.output(false));
        assert!(!gate.output(true)); // latch not set
        gate.toggle();
        assert!(gate.output(true));
        assert!(!gate.output(false)); // interlock holds with latch set
    }

    #[test]
    fn toggle_flips_latch() {
        let mut gate = SafetyGate::new();
        assert!(gate.toggle());
        assert!(!gate.toggle());
    }

    #[test]
    fn latch_survives_beam_transitions() {
        let mut gate = SafetyGate::new();
        gate.toggle();
        assert!(!gate.output(false));
        assert!(gate.output(true)); // re-lit without re-arming
        assert!(gate.is_enabled());
    }

    #[test]
    fn reset_drops_latch() {
        let mut gate = SafetyGate::new();
        gate.toggle();
        gate.reset();
        assert!(!gate.is_enabled());
        assert!(!gate.output(true));
    }
}
