//! Level classification from two probe readings
//!
//! The probes hang at two heights. A probe in liquid conducts, pulling its
//! averaged reading below the probe's threshold; a probe in air reads above
//! it. Comparing both readings gives one of four states:
//!
//! | lower probe  | upper probe  | state      |
//! |--------------|--------------|------------|
//! | above thr.   | above thr.   | `Critical` |
//! | below thr.   | above thr.   | `Low`      |
//! | below thr.   | below thr.   | `High`     |
//! | anything else, including a reading equal to its threshold | | `Error` |
//!
//! The upper probe wet with the lower one dry is physically impossible for
//! a single liquid column and lands in `Error`, as does a reading sitting
//! exactly on its threshold.
//!
//! ```rust
//! use levelguard_core::{classify, LevelState};
//!
//! assert_eq!(classify(2200, 2100, 2120, 2020), LevelState::Critical);
//! assert_eq!(classify(2000, 2100, 2120, 2020), LevelState::Low);
//! assert_eq!(classify(2000, 1900, 2120, 2020), LevelState::High);
//! assert_eq!(classify(2120, 2100, 2120, 2020), LevelState::Error);
//! ```

use core::cmp::Ordering;
use core::fmt;

use crate::constants::{HIGH_CONDUCTION_THRESHOLD, LOW_CONDUCTION_THRESHOLD};

/// Discrete liquid level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LevelState {
    /// Both probes dry
    Critical,
    /// Only the lower probe wet
    Low,
    /// Both probes wet
    High,
    /// Readings match no physical level
    Error,
}

impl LevelState {
    /// Lower-case name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Low => "low",
            Self::High => "high",
            Self::Error => "error",
        }
    }

    /// True for [`LevelState::Error`]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for LevelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LevelState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name())
    }
}

/// Thresholds for the two probes, in averaged-reading units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPair {
    /// Lower probe threshold
    pub low: u16,
    /// Upper probe threshold
    pub high: u16,
}

impl Default for ThresholdPair {
    fn default() -> Self {
        Self {
            low: LOW_CONDUCTION_THRESHOLD,
            high: HIGH_CONDUCTION_THRESHOLD,
        }
    }
}

impl ThresholdPair {
    /// Pair from explicit values
    pub const fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    /// Classify two averaged readings against this pair
    pub const fn classify(&self, low_reading: u16, high_reading: u16) -> LevelState {
        classify(low_reading, high_reading, self.low, self.high)
    }
}

/// Classify a pair of averaged readings.
///
/// Pure and total: any four values produce exactly one state.
pub const fn classify(
    low_reading: u16,
    high_reading: u16,
    low_threshold: u16,
    high_threshold: u16,
) -> LevelState {
    match (
        compare(low_reading, low_threshold),
        compare(high_reading, high_threshold),
    ) {
        (Ordering::Greater, Ordering::Greater) => LevelState::Critical,
        (Ordering::Less, Ordering::Greater) => LevelState::Low,
        (Ordering::Less, Ordering::Less) => LevelState::High,
        _ => LevelState::Error,
    }
}

// `Ord::cmp` is not const
const fn compare(reading: u16, threshold: u16) -> Ordering {
    if reading > threshold {
        Ordering::Greater
    } else if reading < threshold {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOW_THR: u16 = 2120;
    const HIGH_THR: u16 = 2020;

    #[test]
    fn both_dry_is_critical() {
        assert_eq!(classify(2200, 2100, LOW_THR, HIGH_THR), LevelState::Critical);
    }

    #[test]
    fn lower_wet_is_low() {
        assert_eq!(classify(2000, 2100, LOW_THR, HIGH_THR), LevelState::Low);
    }

    #[test]
    fn both_wet_is_high() {
        assert_eq!(classify(2000, 1900, LOW_THR, HIGH_THR), LevelState::High);
    }

    #[test]
    fn upper_wet_lower_dry_is_error() {
        assert_eq!(classify(2200, 1900, LOW_THR, HIGH_THR), LevelState::Error);
    }

    #[test]
    fn equality_is_error() {
        assert_eq!(classify(2120, 2100, LOW_THR, HIGH_THR), LevelState::Error);
        assert_eq!(classify(2000, 2020, LOW_THR, HIGH_THR), LevelState::Error);
        assert_eq!(classify(2120, 2020, LOW_THR, HIGH_THR), LevelState::Error);
    }

    #[test]
    fn extremes_are_classified() {
        assert_eq!(classify(u16::MAX, u16::MAX, 0, 0), LevelState::Critical);
        assert_eq!(classify(0, 0, u16::MAX, u16::MAX), LevelState::High);
        assert_eq!(classify(0, 0, 0, 0), LevelState::Error);
    }

    #[test]
    fn default_pair_uses_measured_thresholds() {
        let pair = ThresholdPair::default();

        assert_eq!(pair, ThresholdPair::new(2120, 2020));
        assert_eq!(pair.classify(2000, 2100), LevelState::Low);
    }

    #[test]
    fn names() {
        assert_eq!(LevelState::Critical.name(), "critical");
        assert_eq!(LevelState::Low.name(), "low");
        assert_eq!(LevelState::High.name(), "high");
        assert_eq!(LevelState::Error.name(), "error");
        assert!(LevelState::Error.is_error());
        assert!(!LevelState::High.is_error());
    }
}
