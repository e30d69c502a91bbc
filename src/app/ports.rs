//! Port traits — the hexagonal boundary between controller logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters (the sensed high-beam input, the relay/LED outputs,
//! event sinks) implement these traits.  The
//! [`ControllerService`](super::service::ControllerService) consumes them
//! via generics, so the domain core never touches hardware directly.

use super::events::ControllerEvent;

/// One per-tick reading of the high-beam circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BeamSample {
    /// Physical current through the high-beam circuit, in amperes.
    /// Converted to the ADC domain and conditioned with hysteresis.
    Current(f32),
    /// Direct boolean high-beam request, for simplified hosts that have
    /// no analog front end.  Bypasses the affine map but still flows
    /// through the conditioner.
    Logic(bool),
}

/// Read-side port: the domain calls this once per tick.
pub trait BeamSensePort {
    fn sample(&mut self) -> BeamSample;
}

/// Write-side port: the domain commands the spotlight relay and the two
/// panel indicator LEDs through this.
pub trait OutputPort {
    /// Drive the auxiliary spotlight relay.
    fn set_spotlight(&mut self, on: bool);

    /// Drive the "output active" indicator LED.
    fn set_output_indicator(&mut self, on: bool);

    /// Drive the "flash in progress" indicator LED.
    fn set_flash_indicator(&mut self, on: bool);

    /// Kill every output — safe shutdown / reset.
    fn all_off(&mut self);
}

/// The domain emits structured [`ControllerEvent`]s through this port.
/// Adapters decide where they go (serial log, display, telemetry).
/// Purely observational — nothing feeds back into the state machine.
pub trait EventSink {
    fn emit(&mut self, event: &ControllerEvent);
}
