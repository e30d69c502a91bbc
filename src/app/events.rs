//! Outbound controller events and the status snapshot.
//!
//! The [`ControllerService`](super::service::ControllerService) emits
//! these through the [`EventSink`](super::ports::EventSink) port.
//! Adapters on the other side decide what to do with them — log to
//! serial, refresh an LCD, feed telemetry.

/// Structured events emitted by the controller core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The controller started ticking.
    Started,
    /// The conditioned high-beam signal changed.
    BeamChanged(bool),
    /// First qualifying flash pulse recognised.
    FirstFlash,
    /// Double flash recognised; carries the new enable latch value.
    DoubleFlash { enabled: bool },
    /// Second pulse landed after the window; gesture restarted from it.
    WindowRestarted,
    /// Gesture disqualified (beam held on past the flash limit).
    GestureDisqualified,
    /// Armed gesture abandoned after the timeout window.
    GestureTimedOut,
    /// The interlocked spotlight output changed.
    OutputChanged(bool),
    /// The controller was reset to its initial state.
    Reset,
}

/// A point-in-time snapshot of every externally visible signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Conditioned high-beam signal.
    pub beam_on: bool,
    /// Latched enable flag (toggled by double flashes).
    pub aux_enabled: bool,
    /// Interlocked spotlight output (`beam_on && aux_enabled`).
    pub aux_output: bool,
    /// Pulses recognised in the gesture in progress (0, 1, or 2).
    pub pulse_count: u8,
    /// Phase of the "output active" indicator LED.
    pub output_indicator: bool,
    /// Phase of the "flash in progress" indicator LED.
    pub flash_indicator: bool,
    /// Control ticks executed since start or last reset.
    pub tick_count: u64,
}
