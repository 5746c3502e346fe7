//! Constants for LevelGuard Core
//!
//! Every number the monitor relies on lives here, with the unit in the name
//! and a note on where it came from.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Sensors**: Pin wiring, converter range and the measured thresholds
//! - **Sampling**: Noise-reduction policy for the averaging sampler
//! - **Time**: Pauses between samples and between classification cycles
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Thresholds are board and probe specific - re-measure after rewiring
//! 3. Use descriptive names that include units

/// Sensor wiring, converter range and conductivity thresholds.
pub mod sensors;

/// Averaging policy for the sampler.
pub mod sampling;

/// Pauses used by the sampler and the monitor loop.
pub mod time;

// Re-export commonly used constants for convenience
pub use sensors::{
    LOW_SENSOR_PIN, HIGH_SENSOR_PIN,
    LOW_SENSOR_CHANNEL, HIGH_SENSOR_CHANNEL,
    LOW_CONDUCTION_THRESHOLD, HIGH_CONDUCTION_THRESHOLD,
    ADC_RESOLUTION_BITS, ADC_MAX, NO_CHANNEL,
};

pub use sampling::{DEFAULT_SAMPLE_COUNT, MAX_CHANNELS};

pub use time::{DEFAULT_SAMPLE_DELAY_US, DEFAULT_CYCLE_PERIOD_MS, MAX_CYCLE_PERIOD_MS};
