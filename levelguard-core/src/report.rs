//! Per-cycle diagnostics
//!
//! Every cycle produces a [`CycleReport`]: both averaged readings, both
//! thresholds and the resulting state. What happens to it is up to the
//! [`Reporter`] handed to the monitor.

use core::fmt;

use crate::classifier::{LevelState, ThresholdPair};
use crate::traits::Reporter;

/// Outcome of one classification cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CycleReport {
    /// Averaged reading of the lower probe
    pub low_reading: u16,
    /// Averaged reading of the upper probe
    pub high_reading: u16,
    /// Low threshold in effect
    pub low_threshold: u16,
    /// High threshold in effect
    pub high_threshold: u16,
    /// Classified level
    pub state: LevelState,
}

impl CycleReport {
    /// Classify `low_reading`/`high_reading` against `thresholds`
    pub const fn new(low_reading: u16, high_reading: u16, thresholds: ThresholdPair) -> Self {
        Self {
            low_reading,
            high_reading,
            low_threshold: thresholds.low,
            high_threshold: thresholds.high,
            state: thresholds.classify(low_reading, high_reading),
        }
    }

    /// Thresholds in effect
    pub const fn thresholds(&self) -> ThresholdPair {
        ThresholdPair::new(self.low_threshold, self.high_threshold)
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "low {}/{} high {}/{} -> {}",
            self.low_reading, self.low_threshold, self.high_reading, self.high_threshold, self.state
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CycleReport {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "low {}/{} high {}/{} -> {}",
            self.low_reading,
            self.low_threshold,
            self.high_reading,
            self.high_threshold,
            self.state
        )
    }
}

/// Reporter writing the classic five diagnostic lines to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, report: &CycleReport) {
        log_info!("Low level: {}", report.low_reading);
        log_info!("High level: {}", report.high_reading);
        log_info!("Low threshold: {}", report.low_threshold);
        log_info!("High threshold: {}", report.high_threshold);
        log_info!("Level {}", report.state);
    }
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReport;

impl Reporter for NoReport {
    fn report(&mut self, _report: &CycleReport) {}
}
