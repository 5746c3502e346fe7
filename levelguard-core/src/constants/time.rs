//! Time Constants
//!
//! Pauses used inside and between classification cycles.

/// Pause after each raw read (µs).
///
/// Lets the sample-and-hold settle and decorrelates successive noise samples
/// from mains pickup on the probe leads.
pub const DEFAULT_SAMPLE_DELAY_US: u32 = 500;

/// Pause between classification cycles (ms).
pub const DEFAULT_CYCLE_PERIOD_MS: u32 = 1_000;

/// Longest cycle period whose microsecond count fits the `u32` delay (ms).
///
/// Roughly 71.5 minutes.
pub const MAX_CYCLE_PERIOD_MS: u32 = u32::MAX / 1_000;
