//! Deterministic doubles for the hardware seams
//!
//! Used by the unit and integration tests and by the host demo. Both doubles
//! are `no_std` and allocation free.
//!
//! ```rust
//! use levelguard_core::channels::Channel;
//! use levelguard_core::mock::{RecordingDelay, ScriptedFrontEnd};
//! use levelguard_core::sampler::AveragingSampler;
//!
//! let mut adc = ScriptedFrontEnd::<16>::new();
//! adc.queue(Channel::new(0), &[2000; 10]);
//! let mut delay = RecordingDelay::new();
//!
//! let value = AveragingSampler::default().sample_averaged(&mut adc, &mut delay, Channel::new(0));
//! assert_eq!(value, Ok(2000));
//! ```

use fugit::MicrosDurationU32;
use heapless::{Deque, Vec};

use crate::channels::{Channel, PinId};
use crate::constants::MAX_CHANNELS;
use crate::traits::{AnalogFrontEnd, Delay, RawSample};

/// Entries kept in the [`ScriptedFrontEnd`] trace
pub const TRACE_CAPACITY: usize = 64;

/// Faults the scripted front end can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// `init` was told to fail
    InitFailed,
    /// Read with no channel selected
    NoChannelSelected,
    /// Channel beyond `MAX_CHANNELS`
    ChannelOutOfRange(Channel),
    /// No sample left for the selected channel
    ScriptExhausted(Channel),
}

#[cfg(feature = "defmt")]
impl defmt::Format for MockError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InitFailed => defmt::write!(fmt, "init failed"),
            Self::NoChannelSelected => defmt::write!(fmt, "no channel selected"),
            Self::ChannelOutOfRange(c) => defmt::write!(fmt, "channel {} out of range", c),
            Self::ScriptExhausted(c) => defmt::write!(fmt, "script exhausted on {}", c),
        }
    }
}

/// Front-end operation, as recorded in the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontEndEvent {
    /// `init` called
    Init,
    /// `configure_pin_for_analog` called
    Configure(PinId),
    /// Channel routed to the sample-and-hold
    Select(Channel),
    /// Sample delivered from a channel
    Read(Channel),
}

/// Front end replaying queued samples per channel
///
/// Each channel holds up to `N` queued samples. Once a channel's queue is
/// empty it falls back to its [`repeat`](Self::repeat) value, or reports
/// [`MockError::ScriptExhausted`].
#[derive(Debug)]
pub struct ScriptedFrontEnd<const N: usize> {
    queues: [Deque<RawSample, N>; MAX_CHANNELS],
    fallback: [Option<RawSample>; MAX_CHANNELS],
    selected: Option<Channel>,
    busy_polls: u8,
    pending_polls: u8,
    fail_init: bool,
    reads: u32,
    trace: Vec<FrontEndEvent, TRACE_CAPACITY>,
}

impl<const N: usize> Default for ScriptedFrontEnd<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ScriptedFrontEnd<N> {
    /// Front end with empty scripts
    pub fn new() -> Self {
        Self {
            queues: core::array::from_fn(|_| Deque::new()),
            fallback: [None; MAX_CHANNELS],
            selected: None,
            busy_polls: 0,
            pending_polls: 0,
            fail_init: false,
            reads: 0,
            trace: Vec::new(),
        }
    }

    /// Queue samples for `channel`; samples beyond capacity are dropped
    pub fn queue(&mut self, channel: Channel, samples: &[RawSample]) {
        if let Some(queue) = self.queues.get_mut(usize::from(channel.index())) {
            for &sample in samples {
                if queue.push_back(sample).is_err() {
                    break;
                }
            }
        }
    }

    /// Value returned by `channel` once its queue is empty
    pub fn repeat(&mut self, channel: Channel, sample: RawSample) {
        if let Some(slot) = self.fallback.get_mut(usize::from(channel.index())) {
            *slot = Some(sample);
        }
    }

    /// Make every read report `WouldBlock` this many times first
    pub fn set_busy_polls(&mut self, polls: u8) {
        self.busy_polls = polls;
        self.pending_polls = polls;
    }

    /// Make the next `init` fail
    pub fn fail_init(&mut self) {
        self.fail_init = true;
    }

    /// Currently selected channel
    pub fn selected(&self) -> Option<Channel> {
        self.selected
    }

    /// Samples delivered so far
    pub fn reads(&self) -> u32 {
        self.reads
    }

    /// First [`TRACE_CAPACITY`] operations, in call order
    pub fn trace(&self) -> &[FrontEndEvent] {
        &self.trace
    }

    /// Samples still queued for `channel`
    pub fn remaining(&self, channel: Channel) -> usize {
        self.queues
            .get(usize::from(channel.index()))
            .map_or(0, |q| q.len())
    }

    fn record(&mut self, event: FrontEndEvent) {
        // Trace is best effort once full
        let _ = self.trace.push(event);
    }
}

impl<const N: usize> AnalogFrontEnd for ScriptedFrontEnd<N> {
    type Error = MockError;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.record(FrontEndEvent::Init);
        if self.fail_init {
            return Err(MockError::InitFailed);
        }
        Ok(())
    }

    fn configure_pin_for_analog(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.record(FrontEndEvent::Configure(pin));
        Ok(())
    }

    fn select_channel(&mut self, channel: Channel) -> Result<(), Self::Error> {
        if usize::from(channel.index()) >= MAX_CHANNELS {
            return Err(MockError::ChannelOutOfRange(channel));
        }
        self.record(FrontEndEvent::Select(channel));
        self.selected = Some(channel);
        Ok(())
    }

    fn read_raw(&mut self) -> nb::Result<RawSample, Self::Error> {
        let channel = self.selected.ok_or(MockError::NoChannelSelected)?;

        if self.pending_polls > 0 {
            self.pending_polls -= 1;
            return Err(nb::Error::WouldBlock);
        }
        self.pending_polls = self.busy_polls;

        let index = usize::from(channel.index());
        let sample = self.queues[index]
            .pop_front()
            .or(self.fallback[index])
            .ok_or(MockError::ScriptExhausted(channel))?;

        self.reads += 1;
        self.record(FrontEndEvent::Read(channel));
        Ok(sample)
    }
}

/// Delay that records instead of sleeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingDelay {
    calls: u32,
    total: MicrosDurationU32,
    last: Option<MicrosDurationU32>,
}

impl Default for RecordingDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDelay {
    /// Delay with nothing recorded
    pub const fn new() -> Self {
        Self {
            calls: 0,
            total: MicrosDurationU32::from_ticks(0),
            last: None,
        }
    }

    /// Number of `sleep` calls
    pub fn calls(&self) -> u32 {
        self.calls
    }

    /// Sum of all requested pauses
    pub fn total(&self) -> MicrosDurationU32 {
        self.total
    }

    /// Most recent pause
    pub fn last(&self) -> Option<MicrosDurationU32> {
        self.last
    }
}

impl Delay for RecordingDelay {
    fn sleep(&mut self, duration: MicrosDurationU32) {
        self.calls += 1;
        self.total = MicrosDurationU32::from_ticks(
            self.total.ticks().saturating_add(duration.ticks()),
        );
        self.last = Some(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_queue_then_fallback() {
        let mut adc = ScriptedFrontEnd::<4>::new();
        let ch = Channel::new(2);
        adc.queue(ch, &[1, 2]);
        adc.repeat(ch, 9);
        adc.select_channel(ch).unwrap();

        assert_eq!(adc.read_raw(), Ok(1));
        assert_eq!(adc.read_raw(), Ok(2));
        assert_eq!(adc.read_raw(), Ok(9));
        assert_eq!(adc.reads(), 3);
    }

    #[test]
    fn read_without_selection_fails() {
        let mut adc = ScriptedFrontEnd::<4>::new();

        assert_eq!(
            adc.read_raw(),
            Err(nb::Error::Other(MockError::NoChannelSelected))
        );
    }

    #[test]
    fn busy_polls_precede_each_sample() {
        let mut adc = ScriptedFrontEnd::<4>::new();
        adc.queue(Channel::new(0), &[5, 6]);
        adc.set_busy_polls(1);
        adc.select_channel(Channel::new(0)).unwrap();

        assert_eq!(adc.read_raw(), Err(nb::Error::WouldBlock));
        assert_eq!(adc.read_raw(), Ok(5));
        assert_eq!(adc.read_raw(), Err(nb::Error::WouldBlock));
        assert_eq!(adc.read_raw(), Ok(6));
    }

    #[test]
    fn channel_out_of_range_rejected() {
        let mut adc = ScriptedFrontEnd::<4>::new();

        assert_eq!(
            adc.select_channel(Channel::new(7)),
            Err(MockError::ChannelOutOfRange(Channel::new(7)))
        );
    }

    #[test]
    fn queue_drops_overflow() {
        let mut adc = ScriptedFrontEnd::<2>::new();
        adc.queue(Channel::new(0), &[1, 2, 3]);

        assert_eq!(adc.remaining(Channel::new(0)), 2);
    }

    #[test]
    fn delay_accumulates() {
        let mut delay = RecordingDelay::new();
        delay.sleep(MicrosDurationU32::micros(500));
        delay.sleep(MicrosDurationU32::millis(1));

        assert_eq!(delay.calls(), 2);
        assert_eq!(delay.total(), MicrosDurationU32::micros(1_500));
        assert_eq!(delay.last(), Some(MicrosDurationU32::micros(1_000)));
    }
}
