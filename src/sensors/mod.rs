//! Sensing front end: current sensor scaling and hysteretic conditioning.
//!
//! The high-beam circuit is observed indirectly through an ACS712 hall
//! current sensor.  [`current`] converts the physical reading into the
//! 10-bit ADC domain; [`hysteresis`] turns the noisy code into a clean
//! boolean "high beam requested" signal with rising/falling edges.

pub mod current;
pub mod hysteresis;

pub use current::{Calibration, CurrentSensor};
pub use hysteresis::{BeamConditioner, Edge, condition};
