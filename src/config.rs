//! System configuration parameters
//!
//! All tunable parameters for the KnightDriver controller.  The defaults
//! match the reference hardware: an ACS712-20A current sensor on a 10-bit
//! ADC watching the high-beam circuit, driving a spotlight relay and two
//! indicator LEDs.  Tests override the timing fields to run fast.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Sensing ---
    /// ADC code at 0 A (2.5 V midpoint on a 0–5 V / 10-bit range).
    pub adc_zero: u16,
    /// ADC counts per ampere (ACS712-20A: 100 mV/A → 20.48 counts/A).
    pub adc_counts_per_amp: f32,
    /// Hysteresis upper threshold: beam reported on at or above this code.
    pub threshold_high: u16,
    /// Hysteresis lower threshold: beam reported off at or below this code.
    pub threshold_low: u16,

    // --- Flash detection ---
    /// Shortest off-duration that counts as a deliberate flash (ms).
    pub min_flash_ms: u32,
    /// Longest off/on duration still part of a flash gesture (ms).
    pub max_flash_ms: u32,
    /// Window from the first pulse within which the second must land (ms).
    pub flash_timeout_ms: u32,
    /// Delay before detector state clears after a completed double flash.
    /// 0 = clear immediately (primary behaviour).
    pub clear_grace_ms: u32,

    // --- Indicators ---
    /// Active-output indicator half-period (ms).
    pub driver_led_interval_ms: u32,
    /// Flash-progress indicator window from first detected pulse (ms).
    pub flash_led_duration_ms: u32,
    /// Flash-progress indicator half-period (ms).
    pub flash_led_interval_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds).
    pub tick_interval_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Sensing
            adc_zero: 512,
            adc_counts_per_amp: 20.48,
            threshold_high: 560,
            threshold_low: 530,

            // Flash detection
            min_flash_ms: 100,
            max_flash_ms: 2000,
            flash_timeout_ms: 3000,
            clear_grace_ms: 0,

            // Indicators
            driver_led_interval_ms: 150,
            flash_led_duration_ms: 3000,
            flash_led_interval_ms: 100,

            // Timing
            tick_interval_ms: 50, // 20 Hz
        }
    }
}

impl ControllerConfig {
    /// Range-check the configuration.  Rejects values that would make the
    /// conditioner chatter or the detector accept non-gestures.
    pub fn validate(&self) -> Result<()> {
        if self.threshold_low >= self.threshold_high {
            return Err(Error::Config("threshold_low must be below threshold_high"));
        }
        if self.min_flash_ms >= self.max_flash_ms {
            return Err(Error::Config("min_flash_ms must be below max_flash_ms"));
        }
        if self.flash_timeout_ms < self.max_flash_ms {
            return Err(Error::Config("flash_timeout_ms must cover max_flash_ms"));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = ControllerConfig::default();
        assert!(c.validate().is_ok());
        assert!(c.threshold_high > c.threshold_low);
        assert!(c.threshold_low > c.adc_zero);
        assert!(c.min_flash_ms < c.max_flash_ms);
        assert!(c.max_flash_ms < c.flash_timeout_ms);
        assert!(c.tick_interval_ms > 0);
    }

    #[test]
    fn hysteresis_gap_absorbs_noise() {
        let c = ControllerConfig::default();
        assert!(
            c.threshold_high - c.threshold_low >= 20,
            "dead band must be wide enough to absorb sensor noise"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let c = ControllerConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: ControllerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.threshold_high, c2.threshold_high);
        assert_eq!(c.flash_timeout_ms, c2.flash_timeout_ms);
        assert!((c.adc_counts_per_amp - c2.adc_counts_per_amp).abs() < 0.001);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = ControllerConfig::default();
        let bytes = postcard::to_allocvec(&c).unwrap();
        let c2: ControllerConfig = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(c.adc_zero, c2.adc_zero);
        assert_eq!(c.clear_grace_ms, c2.clear_grace_ms);
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let c = ControllerConfig {
            threshold_high: 530,
            threshold_low: 560,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn timeout_must_cover_flash_duration() {
        let c = ControllerConfig {
            flash_timeout_ms: 1000,
            max_flash_ms: 2000,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }
}
