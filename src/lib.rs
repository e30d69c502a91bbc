//! KnightDriver controller library.
//!
//! Control core of an automotive auxiliary-lighting controller: watches
//! the high-beam circuit through a current sensor, recognises a driver
//! double-flash gesture, and toggles the spotlight output behind a hard
//! safety interlock (spotlight only while the high beam is on).
//!
//! Pure, tick-driven, host-testable.  All I/O goes through the port
//! traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod detector;
pub mod display;
pub mod error;
pub mod indicators;
pub mod safety;
pub mod scheduler;
pub mod sensors;
