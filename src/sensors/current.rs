//! ACS712-20A current sensor scaling.
//!
//! The sensor outputs 2.5 V at 0 A with 100 mV/A sensitivity; on a
//! 0–5 V / 10-bit ADC that is code 512 at rest and 20.48 counts per
//! ampere.  The affine map is applied per tick to whatever reading the
//! host delivers.

/// Two-point affine calibration for the current sensor.
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    /// ADC code at 0 A.
    pub zero_adc: u16,
    /// ADC counts per ampere.
    pub counts_per_amp: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            zero_adc: 512,
            counts_per_amp: 20.48,
        }
    }
}

/// Converts amperes into the conditioner's integer ADC domain.
#[derive(Debug, Clone, Copy)]
pub struct CurrentSensor {
    cal: Calibration,
}

impl CurrentSensor {
    pub fn new(cal: Calibration) -> Self {
        Self { cal }
    }

    /// `code = round(zero + amps * counts_per_amp)`, saturated to the
    /// 10-bit ADC range.  Negative current (reverse flow) clamps at 0.
    pub fn code(&self, amps: f32) -> u16 {
        let code = f32::from(self.cal.zero_adc) + amps * self.cal.counts_per_amp;
        code.round().clamp(0.0, 1023.0) as u16
    }
}
