//! `embedded-hal` 0.2 adapters
//!
//! Most HALs expose the converter as `adc::OneShot` with one typed pin per
//! input. [`OneShotFrontEnd`] wraps such a converter and the two probe pins
//! so the monitor can drive them through [`AnalogFrontEnd`]. [`HalDelay`]
//! does the same for any `DelayUs<u32>` timer.
//!
//! Typed pins are already in analog mode by the time they reach the adapter
//! (`into_analog()` or the HAL's `AdcPin::new`), so
//! `configure_pin_for_analog` only checks that the pin is one of the probes.
//!
//! The adapter dispatches on the probe wiring it was built with: the
//! reference board pins by default, or whatever a [`MonitorConfig`] and
//! [`ChannelMap`] describe via [`OneShotFrontEnd::wired`].

use core::marker::PhantomData;

use embedded_hal::adc::{Channel as HalChannel, OneShot};
use embedded_hal::blocking::delay::DelayUs;
use fugit::MicrosDurationU32;

use crate::channels::{Channel, ChannelMap, PinId};
use crate::config::MonitorConfig;
use crate::constants::{HIGH_SENSOR_CHANNEL, HIGH_SENSOR_PIN, LOW_SENSOR_CHANNEL, LOW_SENSOR_PIN};
use crate::errors::ConfigResult;
use crate::traits::{AnalogFrontEnd, Delay, RawSample};

/// Faults of the `OneShot` adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError<E> {
    /// Converter driver error
    Adc(E),
    /// Channel not wired to either probe pin
    UnknownChannel(Channel),
    /// Pin is not one of the probe pins
    UnknownPin(PinId),
    /// Read before any channel was selected
    NoChannelSelected,
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for HalError<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Adc(e) => defmt::write!(fmt, "adc: {}", e),
            Self::UnknownChannel(c) => defmt::write!(fmt, "unknown channel {}", c),
            Self::UnknownPin(p) => defmt::write!(fmt, "unknown pin {}", p),
            Self::NoChannelSelected => defmt::write!(fmt, "no channel selected"),
        }
    }
}

/// GPIO and converter channel of one probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeWiring {
    /// GPIO the probe is soldered to
    pub pin: PinId,
    /// Converter channel behind that GPIO
    pub channel: Channel,
}

impl ProbeWiring {
    /// Lower probe on the reference board
    pub const LOW_REFERENCE: Self = Self {
        pin: LOW_SENSOR_PIN,
        channel: Channel::new(LOW_SENSOR_CHANNEL),
    };

    /// Upper probe on the reference board
    pub const HIGH_REFERENCE: Self = Self {
        pin: HIGH_SENSOR_PIN,
        channel: Channel::new(HIGH_SENSOR_CHANNEL),
    };
}

/// Two probe pins on one `OneShot` converter
pub struct OneShotFrontEnd<ADC, A, LP, HP> {
    adc: A,
    low: LP,
    high: HP,
    low_wiring: ProbeWiring,
    high_wiring: ProbeWiring,
    selected: Option<Channel>,
    _adc: PhantomData<ADC>,
}

impl<ADC, A, LP, HP> OneShotFrontEnd<ADC, A, LP, HP>
where
    LP: HalChannel<ADC>,
    HP: HalChannel<ADC>,
{
    /// Wrap `adc` with the lower probe on `low` and the upper on `high`,
    /// wired as on the reference board
    pub fn new(adc: A, low: LP, high: HP) -> Self {
        Self::with_wiring(adc, low, high, ProbeWiring::LOW_REFERENCE, ProbeWiring::HIGH_REFERENCE)
    }

    /// Wrap `adc` with explicit probe wiring
    pub fn with_wiring(
        adc: A,
        low: LP,
        high: HP,
        low_wiring: ProbeWiring,
        high_wiring: ProbeWiring,
    ) -> Self {
        Self {
            adc,
            low,
            high,
            low_wiring,
            high_wiring,
            selected: None,
            _adc: PhantomData,
        }
    }

    /// Wrap `adc` with the probe pins of `config` resolved through `channels`
    ///
    /// Fails like [`MonitorConfig::validate_with`].
    pub fn wired(
        adc: A,
        low: LP,
        high: HP,
        config: &MonitorConfig,
        channels: &ChannelMap,
    ) -> ConfigResult<Self> {
        config.validate_with(channels)?;
        let low_wiring = ProbeWiring {
            pin: config.low_pin,
            channel: channels.require(config.low_pin)?,
        };
        let high_wiring = ProbeWiring {
            pin: config.high_pin,
            channel: channels.require(config.high_pin)?,
        };
        Ok(Self::with_wiring(adc, low, high, low_wiring, high_wiring))
    }

    /// Wiring of the lower and upper probe
    pub fn wiring(&self) -> (ProbeWiring, ProbeWiring) {
        (self.low_wiring, self.high_wiring)
    }

    /// Give the converter and pins back
    pub fn release(self) -> (A, LP, HP) {
        (self.adc, self.low, self.high)
    }
}

impl<ADC, A, LP, HP, E> AnalogFrontEnd for OneShotFrontEnd<ADC, A, LP, HP>
where
    A: OneShot<ADC, u16, LP, Error = E> + OneShot<ADC, u16, HP, Error = E>,
    LP: HalChannel<ADC>,
    HP: HalChannel<ADC>,
    E: core::fmt::Debug,
{
    type Error = HalError<E>;

    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn configure_pin_for_analog(&mut self, pin: PinId) -> Result<(), Self::Error> {
        if pin == self.low_wiring.pin || pin == self.high_wiring.pin {
            Ok(())
        } else {
            Err(HalError::UnknownPin(pin))
        }
    }

    fn select_channel(&mut self, channel: Channel) -> Result<(), Self::Error> {
        if channel == self.low_wiring.channel || channel == self.high_wiring.channel {
            self.selected = Some(channel);
            Ok(())
        } else {
            Err(HalError::UnknownChannel(channel))
        }
    }

    fn read_raw(&mut self) -> nb::Result<RawSample, Self::Error> {
        let channel = self.selected.ok_or(HalError::NoChannelSelected)?;

        let result = if channel == self.low_wiring.channel {
            OneShot::<ADC, u16, LP>::read(&mut self.adc, &mut self.low)
        } else {
            OneShot::<ADC, u16, HP>::read(&mut self.adc, &mut self.high)
        };
        result.map_err(|e| e.map(HalError::Adc))
    }
}

/// [`Delay`] over an `embedded-hal` microsecond delay
pub struct HalDelay<D>(pub D);

impl<D: DelayUs<u32>> Delay for HalDelay<D> {
    fn sleep(&mut self, duration: MicrosDurationU32) {
        self.0.delay_us(duration.ticks());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LevelState;
    use crate::errors::ConfigError;
    use crate::monitor::LevelMonitor;
    use crate::report::NoReport;
    use crate::sampler::AveragingSampler;

    struct TestAdc {
        low_value: u16,
        high_value: u16,
    }

    struct LowPin;
    struct HighPin;

    impl HalChannel<TestAdc> for LowPin {
        type ID = u8;
        fn channel() -> u8 {
            0
        }
    }

    impl HalChannel<TestAdc> for HighPin {
        type ID = u8;
        fn channel() -> u8 {
            1
        }
    }

    impl OneShot<TestAdc, u16, LowPin> for TestAdc {
        type Error = ();
        fn read(&mut self, _pin: &mut LowPin) -> nb::Result<u16, ()> {
            Ok(self.low_value)
        }
    }

    impl OneShot<TestAdc, u16, HighPin> for TestAdc {
        type Error = ();
        fn read(&mut self, _pin: &mut HighPin) -> nb::Result<u16, ()> {
            Ok(self.high_value)
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_us: u32,
    }

    impl DelayUs<u32> for CountingDelay {
        fn delay_us(&mut self, us: u32) {
            self.total_us += us;
        }
    }

    fn front_end_adc() -> TestAdc {
        TestAdc {
            low_value: 2000,
            high_value: 2100,
        }
    }

    fn front_end() -> OneShotFrontEnd<TestAdc, TestAdc, LowPin, HighPin> {
        OneShotFrontEnd::new(front_end_adc(), LowPin, HighPin)
    }

    #[test]
    fn reads_follow_selected_channel() {
        let mut adc = front_end();

        adc.select_channel(Channel::new(1)).unwrap();
        assert_eq!(adc.read_raw(), Ok(2100));

        adc.select_channel(Channel::new(0)).unwrap();
        assert_eq!(adc.read_raw(), Ok(2000));
    }

    #[test]
    fn unknown_channel_and_pin_rejected() {
        let mut adc = front_end();

        assert_eq!(
            adc.select_channel(Channel::new(2)),
            Err(HalError::UnknownChannel(Channel::new(2)))
        );
        assert_eq!(adc.configure_pin_for_analog(5), Err(HalError::UnknownPin(5)));
        assert_eq!(adc.read_raw(), Err(nb::Error::Other(HalError::NoChannelSelected)));
    }

    #[test]
    fn sampler_drives_hal_types() {
        let mut adc = front_end();
        let mut delay = HalDelay(CountingDelay::default());

        let value = AveragingSampler::default()
            .sample_averaged(&mut adc, &mut delay, Channel::new(0))
            .unwrap();

        assert_eq!(value, 2000);
        assert_eq!(delay.0.total_us, 5_000);
    }

    #[test]
    fn rewired_board_drives_monitor() {
        let channels = ChannelMap::empty()
            .with_mapping(28, 2)
            .and_then(|m| m.with_mapping(29, 3))
            .unwrap();
        let config = MonitorConfig::default().with_pins(28, 29);
        let adc = OneShotFrontEnd::wired(
            TestAdc { low_value: 2000, high_value: 1900 },
            LowPin,
            HighPin,
            &config,
            &channels,
        )
        .unwrap();

        assert_eq!(
            adc.wiring(),
            (
                ProbeWiring { pin: 28, channel: Channel::new(2) },
                ProbeWiring { pin: 29, channel: Channel::new(3) },
            )
        );

        let mut monitor = LevelMonitor::with_channels(
            adc,
            HalDelay(CountingDelay::default()),
            NoReport,
            config,
            channels,
        )
        .unwrap();

        assert_eq!(monitor.start(), Ok(()));
        let report = monitor.run_once().unwrap();
        assert_eq!((report.low_reading, report.high_reading), (2000, 1900));
        assert_eq!(report.state, LevelState::High);
    }

    #[test]
    fn rewired_adapter_refuses_reference_pins() {
        let channels = ChannelMap::empty()
            .with_mapping(28, 2)
            .and_then(|m| m.with_mapping(29, 3))
            .unwrap();
        let config = MonitorConfig::default().with_pins(28, 29);
        let mut adc = OneShotFrontEnd::wired(front_end_adc(), LowPin, HighPin, &config, &channels)
            .unwrap();

        assert_eq!(adc.configure_pin_for_analog(26), Err(HalError::UnknownPin(26)));
        assert_eq!(
            adc.select_channel(Channel::new(0)),
            Err(HalError::UnknownChannel(Channel::new(0)))
        );
        assert_eq!(
            OneShotFrontEnd::wired(
                front_end_adc(),
                LowPin,
                HighPin,
                &config,
                &ChannelMap::default()
            )
            .err(),
            Some(ConfigError::UnknownPin { pin: 28 })
        );
    }
}
