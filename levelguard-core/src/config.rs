//! Monitor configuration
//!
//! The board ships with compile-time constants, but the monitor only ever
//! sees a [`MonitorConfig`] value. Tests and recalibrated boards build their
//! own with the `with_*` methods; everything left alone keeps the measured
//! defaults from [`constants`](crate::constants).
//!
//! Recognized options:
//!
//! | field | default | meaning |
//! |-------|---------|---------|
//! | `low_threshold` | 2120 | lower probe threshold |
//! | `high_threshold` | 2020 | upper probe threshold |
//! | `sample_count` | 10 | raw reads per averaged value, at least 1 |
//! | `sample_delay_us` | 500 | pause after each raw read |
//! | `cycle_period_ms` | 1000 | pause between cycles, at most 4_294_967 |
//! | `low_pin` | 26 | GPIO of the lower probe |
//! | `high_pin` | 27 | GPIO of the upper probe |
//!
//! With the `serde` feature, a partial document deserializes with the
//! remaining fields at their defaults.

use core::num::NonZeroU16;

use fugit::{MicrosDurationU32, MillisDurationU32};

use crate::channels::{ChannelMap, PinId};
use crate::classifier::ThresholdPair;
use crate::constants::{
    ADC_MAX, DEFAULT_CYCLE_PERIOD_MS, DEFAULT_SAMPLE_COUNT, DEFAULT_SAMPLE_DELAY_US,
    HIGH_CONDUCTION_THRESHOLD, HIGH_SENSOR_PIN, LOW_CONDUCTION_THRESHOLD, LOW_SENSOR_PIN,
    MAX_CYCLE_PERIOD_MS,
};
use crate::errors::{ConfigError, ConfigResult};
use crate::sampler::AveragingSampler;

/// Thresholds, sampling policy, pacing and probe wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MonitorConfig {
    /// Lower probe threshold, averaged-reading units
    pub low_threshold: u16,
    /// Upper probe threshold, averaged-reading units
    pub high_threshold: u16,
    /// Raw reads per averaged value
    pub sample_count: u16,
    /// Pause after each raw read (µs)
    pub sample_delay_us: u32,
    /// Pause between cycles (ms)
    pub cycle_period_ms: u32,
    /// GPIO of the lower probe
    pub low_pin: PinId,
    /// GPIO of the upper probe
    pub high_pin: PinId,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            low_threshold: LOW_CONDUCTION_THRESHOLD,
            high_threshold: HIGH_CONDUCTION_THRESHOLD,
            sample_count: DEFAULT_SAMPLE_COUNT,
            sample_delay_us: DEFAULT_SAMPLE_DELAY_US,
            cycle_period_ms: DEFAULT_CYCLE_PERIOD_MS,
            low_pin: LOW_SENSOR_PIN,
            high_pin: HIGH_SENSOR_PIN,
        }
    }
}

impl MonitorConfig {
    /// Override both thresholds
    pub fn with_thresholds(mut self, low: u16, high: u16) -> Self {
        self.low_threshold = low;
        self.high_threshold = high;
        self
    }

    /// Override the reads per averaged value
    pub fn with_sample_count(mut self, sample_count: u16) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Override the pause after each read
    pub fn with_sample_delay(mut self, delay: MicrosDurationU32) -> Self {
        self.sample_delay_us = delay.ticks();
        self
    }

    /// Override the pause between cycles
    pub fn with_cycle_period(mut self, period: MillisDurationU32) -> Self {
        self.cycle_period_ms = period.ticks();
        self
    }

    /// Override the probe pins
    pub fn with_pins(mut self, low_pin: PinId, high_pin: PinId) -> Self {
        self.low_pin = low_pin;
        self.high_pin = high_pin;
        self
    }

    /// Thresholds as a pair
    pub fn thresholds(&self) -> ThresholdPair {
        ThresholdPair::new(self.low_threshold, self.high_threshold)
    }

    /// Pause after each raw read
    pub fn sample_delay(&self) -> MicrosDurationU32 {
        MicrosDurationU32::micros(self.sample_delay_us)
    }

    /// Pause between cycles
    pub fn cycle_period(&self) -> MillisDurationU32 {
        MillisDurationU32::millis(self.cycle_period_ms)
    }

    /// Check everything that does not depend on the channel map
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sample_count == 0 {
            return Err(ConfigError::ZeroSampleCount);
        }

        for value in [self.low_threshold, self.high_threshold] {
            if value > ADC_MAX {
                return Err(ConfigError::ThresholdOutOfRange { value, max: ADC_MAX });
            }
        }

        if self.cycle_period_ms > MAX_CYCLE_PERIOD_MS {
            return Err(ConfigError::CyclePeriodTooLong {
                period_ms: self.cycle_period_ms,
                max_ms: MAX_CYCLE_PERIOD_MS,
            });
        }

        if self.low_pin == self.high_pin {
            return Err(ConfigError::SamePin { pin: self.low_pin });
        }

        Ok(())
    }

    /// Validate against `channels` as well
    pub fn validate_with(&self, channels: &ChannelMap) -> ConfigResult<()> {
        self.validate()?;
        channels.require(self.low_pin)?;
        channels.require(self.high_pin)?;
        Ok(())
    }

    /// Sampler implementing this policy
    pub fn sampler(&self) -> ConfigResult<AveragingSampler> {
        let count = NonZeroU16::new(self.sample_count).ok_or(ConfigError::ZeroSampleCount)?;
        Ok(AveragingSampler::new(count, self.sample_delay()))
    }
}
