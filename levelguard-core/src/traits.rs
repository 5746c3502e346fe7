//! Hardware seams
//!
//! The monitor never touches registers. Everything it needs from the board is
//! expressed by three small traits, so the same pipeline runs against the
//! RP2040 converter, an `embedded-hal` driver, or a scripted double in tests.
//!
//! - [`AnalogFrontEnd`]: the shared converter and its input multiplexer
//! - [`Delay`]: blocking pauses
//! - [`Reporter`]: where the per-cycle diagnostics go

use fugit::MicrosDurationU32;

use crate::channels::{Channel, PinId};
use crate::report::CycleReport;

/// Single raw converter reading, `0..=ADC_MAX`
pub type RawSample = u16;

/// The analog front end shared by every probe
///
/// There is one sample-and-hold behind one multiplexer. Selecting a channel
/// changes device-wide state, so callers must finish with one channel before
/// selecting the next. Holding the front end by `&mut` is what guarantees
/// that inside [`LevelMonitor`](crate::LevelMonitor).
///
/// ## Example Implementation
///
/// ```rust
/// use levelguard_core::channels::{Channel, PinId};
/// use levelguard_core::traits::{AnalogFrontEnd, RawSample};
///
/// struct FixedFrontEnd {
///     selected: Channel,
/// }
///
/// impl AnalogFrontEnd for FixedFrontEnd {
///     type Error = core::convert::Infallible;
///
///     fn init(&mut self) -> Result<(), Self::Error> { Ok(()) }
///
///     fn configure_pin_for_analog(&mut self, _pin: PinId) -> Result<(), Self::Error> {
///         Ok(())
///     }
///
///     fn select_channel(&mut self, channel: Channel) -> Result<(), Self::Error> {
///         self.selected = channel;
///         Ok(())
///     }
///
///     fn read_raw(&mut self) -> nb::Result<RawSample, Self::Error> {
///         Ok(2048)
///     }
/// }
/// ```
pub trait AnalogFrontEnd {
    /// Fault reported by the converter driver
    type Error: core::fmt::Debug;

    /// Power up and calibrate the converter
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Disconnect digital input and pulls from `pin` so it can be sampled
    fn configure_pin_for_analog(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Route `channel` to the sample-and-hold
    fn select_channel(&mut self, channel: Channel) -> Result<(), Self::Error>;

    /// Start or poll a conversion on the selected channel
    ///
    /// Returns `Err(nb::Error::WouldBlock)` while the conversion is running.
    /// Callers that need a value block with `nb::block!`.
    fn read_raw(&mut self) -> nb::Result<RawSample, Self::Error>;
}

impl<T: AnalogFrontEnd + ?Sized> AnalogFrontEnd for &mut T {
    type Error = T::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        (**self).init()
    }

    fn configure_pin_for_analog(&mut self, pin: PinId) -> Result<(), Self::Error> {
        (**self).configure_pin_for_analog(pin)
    }

    fn select_channel(&mut self, channel: Channel) -> Result<(), Self::Error> {
        (**self).select_channel(channel)
    }

    fn read_raw(&mut self) -> nb::Result<RawSample, Self::Error> {
        (**self).read_raw()
    }
}

/// Blocking pause
///
/// Used at microsecond scale between raw reads and at second scale between
/// cycles. Nothing else runs while it sleeps.
pub trait Delay {
    /// Block for `duration`
    fn sleep(&mut self, duration: MicrosDurationU32);
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn sleep(&mut self, duration: MicrosDurationU32) {
        (**self).sleep(duration)
    }
}

/// Sink for per-cycle diagnostics
///
/// Purely observational; a reporter cannot change the classification.
/// Closures taking `&CycleReport` are reporters too.
pub trait Reporter {
    /// Called once per completed cycle
    fn report(&mut self, report: &CycleReport);
}

impl<F: FnMut(&CycleReport)> Reporter for F {
    fn report(&mut self, report: &CycleReport) {
        self(report)
    }
}
