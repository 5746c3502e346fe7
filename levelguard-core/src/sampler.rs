//! Averaging sampler
//!
//! Conductivity probes on long leads pick up a lot of high-frequency noise.
//! The sampler takes a burst of raw reads from one channel with a short
//! pause after each read and returns their truncated integer mean.
//!
//! The sum is kept in a `u32`: 65 535 samples of 4095 still fit.
//!
//! ```rust
//! use levelguard_core::sampler::mean;
//!
//! assert_eq!(mean(&[100, 102, 98, 100, 100, 101, 99, 100, 100, 100]), Some(100));
//! assert_eq!(mean(&[1, 2]), Some(1));
//! assert_eq!(mean(&[]), None);
//! ```

use core::num::NonZeroU16;

use fugit::MicrosDurationU32;

use crate::channels::Channel;
use crate::constants::{DEFAULT_SAMPLE_COUNT, DEFAULT_SAMPLE_DELAY_US};
use crate::traits::{AnalogFrontEnd, Delay, RawSample};

/// Burst-and-average policy for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AveragingSampler {
    sample_count: NonZeroU16,
    sample_delay: MicrosDurationU32,
}

impl Default for AveragingSampler {
    fn default() -> Self {
        Self {
            sample_count: NonZeroU16::new(DEFAULT_SAMPLE_COUNT).unwrap_or(NonZeroU16::MIN),
            sample_delay: MicrosDurationU32::micros(DEFAULT_SAMPLE_DELAY_US),
        }
    }
}

impl AveragingSampler {
    /// Sampler taking `sample_count` reads with `sample_delay` after each
    pub const fn new(sample_count: NonZeroU16, sample_delay: MicrosDurationU32) -> Self {
        Self {
            sample_count,
            sample_delay,
        }
    }

    /// Reads per averaged value
    pub const fn sample_count(&self) -> NonZeroU16 {
        self.sample_count
    }

    /// Pause after each read
    pub const fn sample_delay(&self) -> MicrosDurationU32 {
        self.sample_delay
    }

    /// Select `channel` and return the mean of a burst of reads.
    ///
    /// Leaves `channel` selected on the front end. Each read blocks until
    /// the conversion completes; a driver fault aborts the burst.
    pub fn sample_averaged<F, D>(
        &self,
        front_end: &mut F,
        delay: &mut D,
        channel: Channel,
    ) -> Result<u16, F::Error>
    where
        F: AnalogFrontEnd,
        D: Delay,
    {
        front_end.select_channel(channel)?;

        let mut sum: u32 = 0;
        for _ in 0..self.sample_count.get() {
            let raw: RawSample = nb::block!(front_end.read_raw())?;
            sum += u32::from(raw);
            delay.sleep(self.sample_delay);
        }

        Ok(truncated_mean(sum, self.sample_count))
    }
}

/// Truncated mean of `samples`, `None` when empty
pub fn mean(samples: &[RawSample]) -> Option<u16> {
    let count = u16::try_from(samples.len()).ok().and_then(NonZeroU16::new)?;
    let sum = samples.iter().map(|&s| u32::from(s)).sum();
    Some(truncated_mean(sum, count))
}

fn truncated_mean(sum: u32, count: NonZeroU16) -> u16 {
    // The mean of u16 values always fits a u16
    (sum / u32::from(count.get())) as u16
}
