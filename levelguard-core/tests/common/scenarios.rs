//! Pre-built tank scenarios
//!
//! Each scenario is a liquid height with the level the monitor should
//! report for it.

use levelguard_core::LevelState;

use super::{HIGH_PROBE_MM, LOW_PROBE_MM};

/// Liquid height and the expected classification
#[derive(Debug, Clone, Copy)]
pub struct TankScenario {
    pub name: &'static str,
    pub level_mm: u32,
    pub expected: LevelState,
}

/// Heights covering every physical level
pub fn fill_sequence() -> [TankScenario; 5] {
    [
        TankScenario {
            name: "empty tank",
            level_mm: 0,
            expected: LevelState::Critical,
        },
        TankScenario {
            name: "just below lower probe",
            level_mm: LOW_PROBE_MM - 5,
            expected: LevelState::Critical,
        },
        TankScenario {
            name: "lower probe covered",
            level_mm: LOW_PROBE_MM + 20,
            expected: LevelState::Low,
        },
        TankScenario {
            name: "just below upper probe",
            level_mm: HIGH_PROBE_MM - 1,
            expected: LevelState::Low,
        },
        TankScenario {
            name: "both probes covered",
            level_mm: HIGH_PROBE_MM + 30,
            expected: LevelState::High,
        },
    ]
}
