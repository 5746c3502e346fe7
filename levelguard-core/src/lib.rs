//! Sampling and classification core for LevelGuard
//!
//! Turns two conductivity probes into a discrete liquid level.
//! Each cycle averages a burst of converter reads per probe, compares both
//! averages with their thresholds and reports one of four states.
//!
//! Key constraints:
//! - Runs on an RP2040 with no heap
//! - One shared converter: probes are sampled strictly one after another
//! - No state survives a cycle
//!
//! ```no_run
//! use levelguard_core::{LevelMonitor, MonitorConfig};
//! use levelguard_core::mock::{RecordingDelay, ScriptedFrontEnd};
//! use levelguard_core::report::LogReporter;
//!
//! let adc = ScriptedFrontEnd::<16>::new(); // the board's converter driver
//! let mut monitor = LevelMonitor::new(adc, RecordingDelay::new(), LogReporter, MonitorConfig::default())
//!     .expect("default wiring is valid");
//!
//! monitor.start().expect("converter up");
//! monitor.run_forever();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod channels;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod errors;
pub mod mock;
pub mod monitor;
pub mod report;
pub mod sampler;
pub mod time;
pub mod traits;

#[cfg(feature = "embedded-hal")]
pub mod hal;

// Public API
pub use channels::{resolve, Channel, ChannelMap, PinId};
pub use classifier::{classify, LevelState, ThresholdPair};
pub use config::MonitorConfig;
pub use errors::{ConfigError, ConfigResult, MonitorError};
pub use monitor::LevelMonitor;
pub use report::CycleReport;
pub use sampler::AveragingSampler;
pub use traits::{AnalogFrontEnd, Delay, RawSample, Reporter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
