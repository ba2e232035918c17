// Copyright 2026 The adc-sampler authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # API for the Analog to Digital converter
//!
//! Channel configuration, read sequences and the [`AdcDevice`] trait that a driver has to
//! implement to be sampled by [`Sampler`](crate::sampler::Sampler).

use core::convert::Infallible;
use core::fmt::Debug;

/// The highest resolution whose unsigned codes fit the `i16` sample buffer.
pub const MAX_RESOLUTION: u8 = 15;

/// Input gain applied by the ADC before conversion.
///
/// Fractional gains extend the measurable input range beyond the reference voltage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gain {
    /// x1/6
    X1_6,
    /// x1/5
    X1_5,
    /// x1/4
    X1_4,
    /// x1/3
    X1_3,
    /// x1/2
    X1_2,
    /// x2/3
    X2_3,
    /// x1
    X1,
    /// x2
    X2,
    /// x3
    X3,
    /// x4
    X4,
    /// x8
    X8,
    /// x16
    X16,
    /// x32
    X32,
    /// x64
    X64,
    /// x128
    X128,
}

impl Gain {
    /// Returns the gain as a `(numerator, denominator)` pair.
    pub const fn ratio(self) -> (i32, i32) {
        match self {
            Gain::X1_6 => (1, 6),
            Gain::X1_5 => (1, 5),
            Gain::X1_4 => (1, 4),
            Gain::X1_3 => (1, 3),
            Gain::X1_2 => (1, 2),
            Gain::X2_3 => (2, 3),
            Gain::X1 => (1, 1),
            Gain::X2 => (2, 1),
            Gain::X3 => (3, 1),
            Gain::X4 => (4, 1),
            Gain::X8 => (8, 1),
            Gain::X16 => (16, 1),
            Gain::X32 => (32, 1),
            Gain::X64 => (64, 1),
            Gain::X128 => (128, 1),
        }
    }
}

impl Default for Gain {
    /// Unity gain
    fn default() -> Self {
        Gain::X1
    }
}

/// Voltage reference selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reference {
    /// Internal reference of the ADC
    Internal,
    /// Supply voltage
    Vdd,
    /// First external reference input
    External0,
    /// Second external reference input
    External1,
}

impl Default for Reference {
    fn default() -> Self {
        Reference::Internal
    }
}

/// Acquisition (sampling) time of a channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcquisitionTime {
    /// Whatever the driver uses when nothing is requested
    Default,
    /// A number of ADC clock ticks
    Ticks(u16),
    /// Microseconds
    Micros(u16),
    /// Nanoseconds
    Nanos(u16),
}

impl Default for AcquisitionTime {
    fn default() -> Self {
        AcquisitionTime::Default
    }
}

/// ADC channel configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Input gain
    pub gain: Gain,
    /// Voltage reference
    pub reference: Reference,
    /// Acquisition time
    pub acquisition_time: AcquisitionTime,
    /// Channel index on the device
    pub channel_id: u8,
    /// Differential rather than single-ended input
    pub differential: bool,
}

impl ChannelConfig {
    /// Single-ended channel with unity gain, internal reference and the default acquisition time.
    pub const fn single_ended(channel_id: u8) -> Self {
        Self {
            gain: Gain::X1,
            reference: Reference::Internal,
            acquisition_time: AcquisitionTime::Default,
            channel_id,
            differential: false,
        }
    }

    pub fn gain(mut self, gain: Gain) -> Self {
        self.gain = gain;
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = reference;
        self
    }

    pub fn acquisition_time(mut self, acquisition_time: AcquisitionTime) -> Self {
        self.acquisition_time = acquisition_time;
        self
    }

    pub fn differential(mut self, differential: bool) -> Self {
        self.differential = differential;
        self
    }
}

/// Returns the sequence bitmask selecting `channel`, or 0 if the index does not fit a mask.
pub fn channel_mask(channel: u8) -> u32 {
    1u32.checked_shl(channel.into()).unwrap_or(0)
}

/// Describes one read: which channels to convert, where to put the results and at which
/// resolution.
///
/// Results are stored one `i16` per selected channel, lowest channel index first.
#[derive(Debug)]
pub struct Sequence<'a> {
    /// Bitmask of the channels to convert
    pub channels: u32,
    /// Destination buffer
    pub buffer: &'a mut [i16],
    /// Resolution in bits
    pub resolution: u8,
}

impl<'a> Sequence<'a> {
    /// Creates a sequence with no channel selected.
    pub fn new(buffer: &'a mut [i16], resolution: u8) -> Self {
        Self {
            channels: 0,
            buffer,
            resolution,
        }
    }

    /// Makes `channel` the only channel converted by this sequence.
    pub fn select(&mut self, channel: u8) -> &mut Self {
        self.channels = channel_mask(channel);
        self
    }

    /// Number of channels selected.
    pub fn channel_count(&self) -> usize {
        self.channels.count_ones() as usize
    }
}

/// Classification of ADC driver errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A parameter (channel, resolution, mask) is out of range
    InvalidInput,
    /// The device cannot provide the requested configuration
    Unsupported,
    /// The destination buffer is too small
    OutOfMemory,
    /// The device is busy with another conversion
    Busy,
    /// The conversion itself failed
    Io,
}

impl ErrorKind {
    /// Negative errno-style code for this kind, as printed on the console.
    pub const fn code(self) -> i32 {
        match self {
            ErrorKind::InvalidInput => -22,
            ErrorKind::Unsupported => -134,
            ErrorKind::OutOfMemory => -12,
            ErrorKind::Busy => -16,
            ErrorKind::Io => -5,
        }
    }
}

/// ADC driver error.
pub trait Error: Debug {
    /// Kind of the error.
    fn kind(&self) -> ErrorKind;

    /// Numeric code of the error. Always negative.
    fn code(&self) -> i32 {
        self.kind().code()
    }
}

impl Error for Infallible {
    fn kind(&self) -> ErrorKind {
        match *self {}
    }
}

impl Error for ErrorKind {
    fn kind(&self) -> ErrorKind {
        *self
    }
}

/// An ADC device that can be configured per channel and read one sequence at a time.
pub trait AdcDevice {
    /// Error type of the driver
    type Error: Error;

    /// Name of the device, for diagnostics.
    fn name(&self) -> &str;

    /// Whether the device is initialised and usable.
    fn is_ready(&self) -> bool;

    /// Applies `config` to the channel it names.
    fn configure_channel(&mut self, config: &ChannelConfig) -> Result<(), Self::Error>;

    /// Converts the channels selected in `sequence`, blocking until the results are in its
    /// buffer.
    fn read(&mut self, sequence: &mut Sequence<'_>) -> Result<(), Self::Error>;
}

impl<T: AdcDevice + ?Sized> AdcDevice for &mut T {
    type Error = T::Error;

    fn name(&self) -> &str {
        T::name(self)
    }

    fn is_ready(&self) -> bool {
        T::is_ready(self)
    }

    fn configure_channel(&mut self, config: &ChannelConfig) -> Result<(), Self::Error> {
        T::configure_channel(self, config)
    }

    fn read(&mut self, sequence: &mut Sequence<'_>) -> Result<(), Self::Error> {
        T::read(self, sequence)
    }
}

/// Converts a raw reading to millivolts at the ADC input.
///
/// Scales linearly so that the full-scale code `2^resolution - 1` maps to `vref_mv`, then undoes
/// the input `gain`. Division truncates towards zero. Returns `None` if `resolution` is not in
/// `1..=MAX_RESOLUTION` or the result does not fit an `i32`.
pub fn raw_to_millivolts(vref_mv: i32, gain: Gain, resolution: u8, raw: i32) -> Option<i32> {
    if resolution == 0 || resolution > MAX_RESOLUTION {
        return None;
    }
    let full_scale = (1i64 << resolution) - 1;
    let (numerator, denominator) = gain.ratio();

    let mv = i64::from(raw) * i64::from(vref_mv) * i64::from(denominator)
        / (full_scale * i64::from(numerator));
    i32::try_from(mv).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millivolts_at_unity_gain() {
        assert_eq!(raw_to_millivolts(1650, Gain::X1, 12, 0), Some(0));
        assert_eq!(raw_to_millivolts(1650, Gain::X1, 12, 4095), Some(1650));
        assert_eq!(raw_to_millivolts(1650, Gain::X1, 12, 2048), Some(825));
        assert_eq!(raw_to_millivolts(1650, Gain::X1, 12, 1), Some(0));
    }

    #[test]
    fn millivolts_truncate_towards_zero() {
        // 1000 * 1650 / 4095 = 402.93
        assert_eq!(raw_to_millivolts(1650, Gain::X1, 12, 1000), Some(402));
        assert_eq!(raw_to_millivolts(1650, Gain::X1, 12, -1000), Some(-402));
    }

    #[test]
    fn millivolts_undo_gain() {
        assert_eq!(raw_to_millivolts(600, Gain::X1_6, 12, 4095), Some(3600));
        assert_eq!(raw_to_millivolts(1650, Gain::X2, 12, 4095), Some(825));
        assert_eq!(raw_to_millivolts(1500, Gain::X2_3, 12, 4095), Some(2250));
    }

    #[test]
    fn millivolts_reject_bad_resolution() {
        assert_eq!(raw_to_millivolts(1650, Gain::X1, 0, 100), None);
        assert_eq!(raw_to_millivolts(1650, Gain::X1, 16, 100), None);
        assert_eq!(raw_to_millivolts(1650, Gain::X1, 15, 32767), Some(1650));
    }

    #[test]
    fn single_ended_defaults() {
        let config = ChannelConfig::single_ended(1);
        assert_eq!(config.gain, Gain::X1);
        assert_eq!(config.reference, Reference::Internal);
        assert_eq!(config.acquisition_time, AcquisitionTime::Default);
        assert_eq!(config.channel_id, 1);
        assert!(!config.differential);

        let config = config.gain(Gain::X4).differential(true);
        assert_eq!(config.gain, Gain::X4);
        assert!(config.differential);
    }

    #[test]
    fn sequence_selects_one_channel() {
        let mut buffer = [0i16; 1];
        let mut sequence = Sequence::new(&mut buffer, 12);
        assert_eq!(sequence.channel_count(), 0);

        sequence.select(1);
        assert_eq!(sequence.channels, 0b10);
        assert_eq!(sequence.channel_count(), 1);

        sequence.select(0);
        assert_eq!(sequence.channels, 0b01);
    }

    #[test]
    fn channel_mask_out_of_range() {
        assert_eq!(channel_mask(31), 1 << 31);
        assert_eq!(channel_mask(32), 0);
    }

    #[test]
    fn error_codes_are_negative() {
        for kind in [
            ErrorKind::InvalidInput,
            ErrorKind::Unsupported,
            ErrorKind::OutOfMemory,
            ErrorKind::Busy,
            ErrorKind::Io,
        ] {
            assert!(kind.code() < 0);
            assert_eq!(Error::code(&kind), kind.code());
        }
    }
}
