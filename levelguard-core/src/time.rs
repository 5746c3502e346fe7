//! Durations and host delays
//!
//! All pauses are `fugit` durations so the same values work on the target
//! timer and on the host. On the host, [`StdDelay`] sleeps the thread.

pub use fugit::{MicrosDurationU32, MillisDurationU32};

/// Delay backed by `std::thread::sleep` (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl crate::traits::Delay for StdDelay {
    fn sleep(&mut self, duration: MicrosDurationU32) {
        std::thread::sleep(std::time::Duration::from_micros(u64::from(duration.ticks())));
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::traits::Delay;

    #[test]
    fn std_delay_sleeps_at_least_requested() {
        let start = std::time::Instant::now();
        StdDelay.sleep(MicrosDurationU32::millis(2));

        assert!(start.elapsed() >= std::time::Duration::from_millis(2));
    }
}
