//! Unified error types for the KnightDriver controller core.
//!
//! The control pipeline itself is total: disqualified gestures, timeouts
//! and bounced edges are expected control-flow outcomes handled by
//! resetting detector state, never surfaced as errors.  The only genuine
//! precondition violation is a non-monotonic clock.  All variants are
//! `Copy` so they can be cheaply passed out of the tick loop without
//! allocation.

use core::fmt;

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The caller-supplied monotonic timestamp moved backwards.
    /// The tick that observed the regression leaves all state untouched.
    ClockRegression { last_ms: u64, now_ms: u64 },
    /// Configuration is invalid (e.g. low threshold above high threshold).
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClockRegression { last_ms, now_ms } => {
                write!(f, "clock regression: {now_ms}ms after {last_ms}ms")
            }
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
