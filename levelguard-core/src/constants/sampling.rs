//! Averaging Policy

/// Raw reads averaged into one reading.
///
/// Ten reads at 500 µs spacing keep a full cycle for both probes around
/// 10 ms, well inside the one second loop period.
pub const DEFAULT_SAMPLE_COUNT: u16 = 10;

/// Pins a [`ChannelMap`](crate::channels::ChannelMap) can hold.
///
/// The RP2040 exposes four analog inputs on GPIO 26-29.
pub const MAX_CHANNELS: usize = 4;
