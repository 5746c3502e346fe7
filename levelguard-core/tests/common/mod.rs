//! Common test utilities for integration tests
//!
//! This module provides:
//! - A tank model turning liquid height into noisy probe samples
//! - Monitor builders over the scripted front end
//! - Named fill and drain scenarios with expected levels

#![allow(dead_code)]

use levelguard_core::{
    channels::Channel,
    mock::{RecordingDelay, ScriptedFrontEnd},
    LevelMonitor, MonitorConfig, Reporter,
};

pub mod scenarios;

/// Samples each channel can queue; enough for several default cycles
pub const SCRIPT_DEPTH: usize = 64;

/// Scripted monitor used throughout the integration tests
pub type TestMonitor<R> = LevelMonitor<ScriptedFrontEnd<SCRIPT_DEPTH>, RecordingDelay, R>;

/// Probe readings when wet and when dry, per the bench measurements
pub const WET_READING: u16 = 1850;
pub const DRY_READING: u16 = 2400;

/// Probe mounting heights in millimetres
pub const LOW_PROBE_MM: u32 = 40;
pub const HIGH_PROBE_MM: u32 = 160;

/// Two probes in a tank, with deterministic noise
pub struct TankModel {
    seed: u32,
    noise_amplitude: u16,
}

impl TankModel {
    /// Tank whose samples wander up to `noise_amplitude` either side
    pub fn new(noise_amplitude: u16) -> Self {
        Self {
            seed: 42,
            noise_amplitude,
        }
    }

    /// `count` raw samples for a probe at `probe_mm` with liquid at `level_mm`
    pub fn samples(&mut self, probe_mm: u32, level_mm: u32, count: usize) -> Vec<u16> {
        let base = if level_mm > probe_mm { WET_READING } else { DRY_READING };
        (0..count).map(|_| self.noisy(base)).collect()
    }

    fn noisy(&mut self, base: u16) -> u16 {
        if self.noise_amplitude == 0 {
            return base;
        }
        let span = u32::from(self.noise_amplitude) * 2 + 1;
        let offset = (self.next_random() % span) as i32 - i32::from(self.noise_amplitude);
        (i32::from(base) + offset).clamp(0, 4095) as u16
    }

    // Linear congruential generator - deterministic across runs
    fn next_random(&mut self) -> u32 {
        self.seed = self.seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (self.seed >> 16) & 0x7fff
    }
}

/// Monitor over a front end scripted with `low` and `high` samples
pub fn scripted_monitor<R: Reporter>(
    low: &[u16],
    high: &[u16],
    config: MonitorConfig,
    reporter: R,
) -> TestMonitor<R> {
    let mut adc = ScriptedFrontEnd::<SCRIPT_DEPTH>::new();
    adc.queue(Channel::new(0), low);
    adc.queue(Channel::new(1), high);

    LevelMonitor::new(adc, RecordingDelay::new(), reporter, config)
        .expect("test configuration is valid")
}

/// Monitor whose probes return constant readings
pub fn steady_monitor<R: Reporter>(low: u16, high: u16, reporter: R) -> TestMonitor<R> {
    let mut adc = ScriptedFrontEnd::<SCRIPT_DEPTH>::new();
    adc.repeat(Channel::new(0), low);
    adc.repeat(Channel::new(1), high);

    LevelMonitor::new(adc, RecordingDelay::new(), reporter, MonitorConfig::default())
        .expect("default configuration is valid")
}
