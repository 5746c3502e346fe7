//! The level monitor
//!
//! [`LevelMonitor`] owns the analog front end, the delay and the reporter,
//! and runs the pipeline:
//!
//! ```text
//! resolve pins -> average lower probe -> average upper probe -> classify -> report
//! ```
//!
//! [`run_once`](LevelMonitor::run_once) is one pass of that pipeline.
//! [`run_forever`](LevelMonitor::run_forever) repeats it with a fixed pause.
//! Nothing is carried from one cycle to the next.
//!
//! The lower probe is always averaged to completion before the upper probe
//! is selected: both share the converter's single sample-and-hold.
//!
//! ```rust
//! use levelguard_core::{LevelMonitor, LevelState, MonitorConfig};
//! use levelguard_core::channels::Channel;
//! use levelguard_core::mock::{RecordingDelay, ScriptedFrontEnd};
//! use levelguard_core::report::NoReport;
//!
//! let mut adc = ScriptedFrontEnd::<16>::new();
//! adc.repeat(Channel::new(0), 2000);
//! adc.repeat(Channel::new(1), 1900);
//!
//! let mut monitor = LevelMonitor::new(adc, RecordingDelay::new(), NoReport, MonitorConfig::default())?;
//! monitor.start()?;
//!
//! let report = monitor.run_once()?;
//! assert_eq!(report.state, LevelState::High);
//! # Ok::<(), levelguard_core::MonitorError<levelguard_core::mock::MockError>>(())
//! ```

use fugit::MicrosDurationU32;

use crate::channels::ChannelMap;
use crate::config::MonitorConfig;
use crate::errors::{ConfigResult, MonitorError};
use crate::report::CycleReport;
use crate::sampler::AveragingSampler;
use crate::traits::{AnalogFrontEnd, Delay, Reporter};

/// Two-probe level monitor
pub struct LevelMonitor<F, D, R> {
    front_end: F,
    delay: D,
    reporter: R,
    config: MonitorConfig,
    channels: ChannelMap,
    sampler: AveragingSampler,
}

impl<F, D, R> LevelMonitor<F, D, R>
where
    F: AnalogFrontEnd,
    D: Delay,
    R: Reporter,
{
    /// Monitor for the reference board wiring
    pub fn new(front_end: F, delay: D, reporter: R, config: MonitorConfig) -> ConfigResult<Self> {
        Self::with_channels(front_end, delay, reporter, config, ChannelMap::default())
    }

    /// Monitor with custom pin wiring
    ///
    /// Fails if the configuration is invalid or a probe pin is not in
    /// `channels`.
    pub fn with_channels(
        front_end: F,
        delay: D,
        reporter: R,
        config: MonitorConfig,
        channels: ChannelMap,
    ) -> ConfigResult<Self> {
        config.validate_with(&channels)?;
        let sampler = config.sampler()?;

        Ok(Self {
            front_end,
            delay,
            reporter,
            config,
            channels,
            sampler,
        })
    }

    /// Bring up the converter and put both probe pins in analog mode.
    ///
    /// A failure here means the board is unusable; callers abort start-up.
    pub fn start(&mut self) -> Result<(), MonitorError<F::Error>> {
        self.front_end.init().map_err(MonitorError::FrontEnd)?;

        for pin in [self.config.low_pin, self.config.high_pin] {
            self.front_end
                .configure_pin_for_analog(pin)
                .map_err(MonitorError::FrontEnd)?;
        }

        log_info!(
            "Level monitor started: pins {}/{}, thresholds {}/{}",
            self.config.low_pin,
            self.config.high_pin,
            self.config.low_threshold,
            self.config.high_threshold
        );
        Ok(())
    }

    /// One classification cycle: resolve, sample, classify, report.
    ///
    /// Returns the report that was handed to the reporter. Errors only come
    /// from the front end; odd readings classify as
    /// [`LevelState::Error`](crate::LevelState::Error).
    pub fn run_once(&mut self) -> Result<CycleReport, MonitorError<F::Error>> {
        let low_channel = self.channels.require(self.config.low_pin)?;
        let high_channel = self.channels.require(self.config.high_pin)?;

        let low_reading = self
            .sampler
            .sample_averaged(&mut self.front_end, &mut self.delay, low_channel)
            .map_err(MonitorError::FrontEnd)?;
        let high_reading = self
            .sampler
            .sample_averaged(&mut self.front_end, &mut self.delay, high_channel)
            .map_err(MonitorError::FrontEnd)?;

        let report = CycleReport::new(low_reading, high_reading, self.config.thresholds());
        self.reporter.report(&report);

        Ok(report)
    }

    /// [`run_once`](Self::run_once), then pause for the cycle period.
    ///
    /// A failed cycle is logged and yields `None`; the pause happens either
    /// way.
    pub fn cycle(&mut self) -> Option<CycleReport> {
        let outcome = match self.run_once() {
            Ok(report) => Some(report),
            Err(err) => {
                warn_cycle_failed(&err);
                None
            }
        };

        // validate() caps the period so the microsecond count fits a u32
        self.delay
            .sleep(MicrosDurationU32::millis(self.config.cycle_period_ms));
        outcome
    }

    /// Run cycles until power is removed
    pub fn run_forever(&mut self) -> ! {
        loop {
            self.cycle();
        }
    }

    /// Configuration in effect
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Pin wiring in effect
    pub fn channels(&self) -> &ChannelMap {
        &self.channels
    }

    /// Sampling policy in effect
    pub fn sampler(&self) -> &AveragingSampler {
        &self.sampler
    }

    /// Borrow the front end
    pub fn front_end(&self) -> &F {
        &self.front_end
    }

    /// Borrow the delay
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Borrow the reporter
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Give the hardware back
    pub fn release(self) -> (F, D, R) {
        (self.front_end, self.delay, self.reporter)
    }
}

#[cfg(feature = "defmt")]
fn warn_cycle_failed<E: core::fmt::Debug>(err: &MonitorError<E>) {
    defmt::warn!("Cycle failed: {}", defmt::Debug2Format(err));
}

#[cfg(not(feature = "defmt"))]
fn warn_cycle_failed<E: core::fmt::Debug>(err: &MonitorError<E>) {
    log_warn!("Cycle failed: {:?}", err);
}
