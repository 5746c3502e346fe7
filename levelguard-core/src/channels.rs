//! Pin to ADC channel resolution
//!
//! The converter has a single input multiplexer; each analog-capable GPIO is
//! hard-wired to one mux input. [`ChannelMap`] records that wiring for the
//! pins the board actually uses, so adding a probe is one
//! [`with_mapping`](ChannelMap::with_mapping) call and nothing else changes.
//!
//! Two forms of lookup are offered:
//! - [`ChannelMap::resolve`] returns `Option<Channel>`
//! - [`ChannelMap::channel_index`] and the free [`resolve`] return a plain
//!   index with [`NO_CHANNEL`] (`-1`) for unmapped pins
//!
//! ```rust
//! use levelguard_core::channels::{self, ChannelMap};
//!
//! assert_eq!(channels::resolve(26), 0);
//! assert_eq!(channels::resolve(27), 1);
//! assert_eq!(channels::resolve(99), -1);
//!
//! let map = ChannelMap::default().with_mapping(28, 2)?;
//! assert_eq!(map.resolve(28).map(|c| c.index()), Some(2));
//! # Ok::<(), levelguard_core::ConfigError>(())
//! ```

use core::fmt;

use heapless::Vec;

use crate::constants::{
    HIGH_SENSOR_CHANNEL, HIGH_SENSOR_PIN, LOW_SENSOR_CHANNEL, LOW_SENSOR_PIN, MAX_CHANNELS,
    NO_CHANNEL,
};
use crate::errors::{ConfigError, ConfigResult};

/// Physical GPIO number
pub type PinId = u8;

/// ADC mux input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel(u8);

impl Channel {
    /// Wrap a mux input number
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Mux input number
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "ADC{}", self.0)
    }
}

/// One GPIO wired to one mux input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMapping {
    /// GPIO number
    pub pin: PinId,
    /// Mux input it drives
    pub channel: Channel,
}

/// Pins wired to the converter, at most [`MAX_CHANNELS`] of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    entries: Vec<PinMapping, MAX_CHANNELS>,
}

impl Default for ChannelMap {
    /// The two level probes of the reference board
    fn default() -> Self {
        let mut entries = Vec::new();
        // Capacity is MAX_CHANNELS >= 2
        let _ = entries.push(PinMapping {
            pin: LOW_SENSOR_PIN,
            channel: Channel(LOW_SENSOR_CHANNEL),
        });
        let _ = entries.push(PinMapping {
            pin: HIGH_SENSOR_PIN,
            channel: Channel(HIGH_SENSOR_CHANNEL),
        });
        Self { entries }
    }
}

impl ChannelMap {
    /// Map with no pins
    pub const fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a pin, rejecting duplicates on either side
    pub fn with_mapping(mut self, pin: PinId, channel: u8) -> ConfigResult<Self> {
        let channel = Channel(channel);

        if self.entries.iter().any(|m| m.pin == pin) {
            return Err(ConfigError::DuplicatePin { pin });
        }
        if self.entries.iter().any(|m| m.channel == channel) {
            return Err(ConfigError::DuplicateChannel { channel });
        }

        self.entries
            .push(PinMapping { pin, channel })
            .map_err(|_| ConfigError::ChannelMapFull)?;
        Ok(self)
    }

    /// Channel wired to `pin`, if any
    pub fn resolve(&self, pin: PinId) -> Option<Channel> {
        self.entries
            .iter()
            .find(|m| m.pin == pin)
            .map(|m| m.channel)
    }

    /// Channel index for `pin`, or [`NO_CHANNEL`]
    pub fn channel_index(&self, pin: PinId) -> i8 {
        match self.resolve(pin) {
            // Mux inputs are < MAX_CHANNELS, far below i8::MAX
            Some(channel) => channel.index() as i8,
            None => NO_CHANNEL,
        }
    }

    /// Like [`resolve`](Self::resolve) but with a configuration error for unmapped pins
    pub fn require(&self, pin: PinId) -> ConfigResult<Channel> {
        self.resolve(pin).ok_or(ConfigError::UnknownPin { pin })
    }

    /// Mapped pins in insertion order
    pub fn pins(&self) -> impl Iterator<Item = PinId> + '_ {
        self.entries.iter().map(|m| m.pin)
    }

    /// All mappings in insertion order
    pub fn mappings(&self) -> &[PinMapping] {
        &self.entries
    }

    /// Number of mapped pins
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no pin is mapped
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve `pin` against the reference board wiring.
///
/// Returns [`NO_CHANNEL`] for any pin other than the two level probes.
pub fn resolve(pin: PinId) -> i8 {
    match pin {
        LOW_SENSOR_PIN => LOW_SENSOR_CHANNEL as i8,
        HIGH_SENSOR_PIN => HIGH_SENSOR_CHANNEL as i8,
        _ => NO_CHANNEL,
    }
}
