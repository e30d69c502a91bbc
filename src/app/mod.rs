//! Application layer: the controller service and its port boundary.
//!
//! Domain modules (`sensors`, `detector`, `safety`, `indicators`,
//! `scheduler`) are pure; everything that touches the outside world goes
//! through the traits in [`ports`].

pub mod events;
pub mod ports;
pub mod service;
