//! Error Types for Configuration and Hardware Failures
//!
//! ## Design Philosophy
//!
//! Unlike a validator, the level monitor has very few ways to fail. An odd
//! combination of readings is not an error at all: it classifies as
//! [`LevelState::Error`](crate::LevelState::Error) and the loop carries on.
//! What remains fits in two enums:
//!
//! 1. [`ConfigError`]: the configuration cannot describe a working monitor
//!    (zero samples, threshold beyond the converter range, cycle period too
//!    long to sleep, unmapped pin).
//!    Reported once, before any hardware is touched.
//!
//! 2. [`MonitorError`]: either a `ConfigError`, or a fault reported by the
//!    analog front end itself. The front end owns its error type, so the
//!    monitor error is generic over it.
//!
//! Both are `Copy` when the front-end error is, carry no heap data and print
//! through `Display` (or `defmt::Format` on the target).
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use levelguard_core::{ConfigError, MonitorConfig};
//!
//! let config = MonitorConfig::default().with_sample_count(0);
//! match config.validate() {
//!     Ok(()) => {}
//!     Err(ConfigError::ZeroSampleCount) => {
//!         // fall back to the default policy
//!     }
//!     Err(_) => {
//!         // wiring or threshold mistake - refuse to start
//!     }
//! }
//! ```

use thiserror_no_std::Error;

use crate::channels::{Channel, PinId};

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration mistakes detected before the monitor starts
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Averaging over zero samples has no mean
    #[error("Sample count must be at least 1")]
    ZeroSampleCount,

    /// Threshold can never be crossed by a converter reading
    #[error("Threshold {value} outside converter range [0, {max}]")]
    ThresholdOutOfRange {
        /// Configured threshold
        value: u16,
        /// Largest raw sample the converter produces
        max: u16,
    },

    /// Cycle period too long for the microsecond delay
    #[error("Cycle period {period_ms} ms exceeds {max_ms} ms")]
    CyclePeriodTooLong {
        /// Configured period (ms)
        period_ms: u32,
        /// Longest accepted period (ms)
        max_ms: u32,
    },

    /// Sensor pin has no ADC channel in the channel map
    #[error("Pin {pin} is not wired to an ADC channel")]
    UnknownPin {
        /// Offending pin
        pin: PinId,
    },

    /// Both probes configured on the same pin
    #[error("Low and high sensors share pin {pin}")]
    SamePin {
        /// Shared pin
        pin: PinId,
    },

    /// Pin already present in the channel map
    #[error("Pin {pin} is already mapped")]
    DuplicatePin {
        /// Offending pin
        pin: PinId,
    },

    /// Channel already claimed by another pin
    #[error("Channel {channel} is already mapped")]
    DuplicateChannel {
        /// Offending channel
        channel: Channel,
    },

    /// No room left in the channel map
    #[error("Channel map is full")]
    ChannelMapFull,
}

/// Failures of a classification cycle or of monitor start-up
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorError<E> {
    /// Configuration rejected
    #[error("Invalid configuration: {0}")]
    Config(ConfigError),

    /// Analog front end reported a fault
    #[error("Analog front end fault: {0:?}")]
    FrontEnd(E),
}

impl<E> From<ConfigError> for MonitorError<E> {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroSampleCount =>
                defmt::write!(fmt, "Sample count is zero"),
            Self::ThresholdOutOfRange { value, max } =>
                defmt::write!(fmt, "Threshold {} outside [0, {}]", value, max),
            Self::CyclePeriodTooLong { period_ms, max_ms } =>
                defmt::write!(fmt, "Cycle period {} ms over {} ms", period_ms, max_ms),
            Self::UnknownPin { pin } =>
                defmt::write!(fmt, "Pin {} not mapped", pin),
            Self::SamePin { pin } =>
                defmt::write!(fmt, "Sensors share pin {}", pin),
            Self::DuplicatePin { pin } =>
                defmt::write!(fmt, "Pin {} mapped twice", pin),
            Self::DuplicateChannel { channel } =>
                defmt::write!(fmt, "Channel {} mapped twice", channel.index()),
            Self::ChannelMapFull =>
                defmt::write!(fmt, "Channel map full"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for MonitorError<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Config(err) => defmt::write!(fmt, "Config: {}", err),
            Self::FrontEnd(err) => defmt::write!(fmt, "Front end: {}", err),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ConfigError::ThresholdOutOfRange { value: 5000, max: 4095 };
        assert_eq!(err.to_string(), "Threshold 5000 outside converter range [0, 4095]");

        let err = ConfigError::DuplicateChannel { channel: Channel::new(1) };
        assert_eq!(err.to_string(), "Channel 1 is already mapped");
    }

    #[test]
    fn config_errors_convert_into_monitor_errors() {
        let err: MonitorError<()> = ConfigError::UnknownPin { pin: 99 }.into();
        assert_eq!(err, MonitorError::Config(ConfigError::UnknownPin { pin: 99 }));
        assert_eq!(err.to_string(), "Invalid configuration: Pin 99 is not wired to an ADC channel");
    }
}
