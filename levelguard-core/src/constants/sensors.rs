//! Sensor Wiring and Conductivity Thresholds
//!
//! Values for the reference board: a Pico W with a transistorised two-probe
//! level board on GPIO 26 and GPIO 27.

// ===== PIN WIRING =====

/// GPIO wired to the lower probe.
///
/// GPIO 26 is the first analog-capable pin on the RP2040 (ADC0).
pub const LOW_SENSOR_PIN: u8 = 26;

/// GPIO wired to the upper probe (ADC1).
pub const HIGH_SENSOR_PIN: u8 = 27;

/// ADC input multiplexed onto [`LOW_SENSOR_PIN`].
pub const LOW_SENSOR_CHANNEL: u8 = 0;

/// ADC input multiplexed onto [`HIGH_SENSOR_PIN`].
pub const HIGH_SENSOR_CHANNEL: u8 = 1;

/// Sentinel returned by the integer form of the resolver for unmapped pins.
pub const NO_CHANNEL: i8 = -1;

// ===== CONVERTER =====

/// Converter resolution in bits.
///
/// Source: RP2040 datasheet, section 4.9 (12-bit SAR ADC)
pub const ADC_RESOLUTION_BITS: u8 = 12;

/// Largest raw sample the converter can produce.
pub const ADC_MAX: u16 = (1 << ADC_RESOLUTION_BITS) - 1;

// ===== CONDUCTION THRESHOLDS =====
//
// Readings below a threshold mean high conductivity (probe wet).
// Readings above mean low conductivity (probe in air).

/// Averaged-reading threshold for the lower probe.
///
/// Source: bench measurements with tap water, 3.3 V supply
pub const LOW_CONDUCTION_THRESHOLD: u16 = 2120;

/// Averaged-reading threshold for the upper probe.
///
/// Source: bench measurements with tap water, 3.3 V supply
pub const HIGH_CONDUCTION_THRESHOLD: u16 = 2020;
