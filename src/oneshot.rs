// Copyright 2026 The adc-sampler authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Adapter for embedded-hal 0.2 one-shot ADCs
//!
//! Most HALs expose their ADC through [`embedded_hal_02::adc::OneShot`], one conversion per pin
//! per call. [`OneShotAdc`] turns such an ADC plus two analog pins into an [`AdcDevice`]: pin 0
//! becomes channel 0, pin 1 becomes channel 1.
//!
//! A one-shot ADC has no per-channel settings, so only the configuration the HAL already runs
//! with (unity gain, internal reference, default acquisition time, single-ended) is accepted.

use core::fmt::Debug;
use core::marker::PhantomData;

use embedded_hal_02::adc::{Channel, OneShot};

use crate::adc::{
    self, AcquisitionTime, AdcDevice, ChannelConfig, ErrorKind, Gain, Reference, Sequence,
};

/// Number of channels an adapter exposes.
pub const CHANNEL_COUNT: u8 = 2;

const ALL_CHANNELS: u32 = (1 << CHANNEL_COUNT) - 1;

/// Adapter error
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error<E> {
    /// No such channel
    #[error("Invalid channel {0}")]
    InvalidChannel(u8),
    /// The channel was read before being configured
    #[error("Channel {0} not configured")]
    NotConfigured(u8),
    /// The requested channel settings cannot be applied
    #[error("Unsupported channel configuration")]
    Unsupported,
    /// The sequence asks for a resolution other than the ADC's, or the HAL returned a code that
    /// does not fit the sample buffer
    #[error("Unsupported resolution of {0} bits")]
    Resolution(u8),
    /// The sequence buffer cannot hold one sample per selected channel
    #[error("Sample buffer too small")]
    BufferTooSmall,
    /// The HAL reported an error
    #[error("Conversion failed")]
    Conversion(E),
}

impl<E: Debug> adc::Error for Error<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidChannel(_) | Self::NotConfigured(_) | Self::Resolution(_) => {
                ErrorKind::InvalidInput
            }
            Self::Unsupported => ErrorKind::Unsupported,
            Self::BufferTooSmall => ErrorKind::OutOfMemory,
            Self::Conversion(_) => ErrorKind::Io,
        }
    }
}

/// Two-channel [`AdcDevice`] over an embedded-hal 0.2 one-shot ADC.
pub struct OneShotAdc<'n, ADC, A, P0, P1> {
    adc: A,
    pins: (P0, P1),
    name: &'n str,
    resolution: u8,
    configured: u32,
    _adc: PhantomData<ADC>,
}

impl<'n, ADC, A, P0, P1, E> OneShotAdc<'n, ADC, A, P0, P1>
where
    A: OneShot<ADC, u16, P0, Error = E> + OneShot<ADC, u16, P1, Error = E>,
    P0: Channel<ADC>,
    P1: Channel<ADC>,
    E: Debug,
{
    /// Wraps `adc`, which converts at `resolution` bits, with the pins for channel 0 and 1.
    pub fn new(adc: A, pins: (P0, P1), name: &'n str, resolution: u8) -> Self {
        Self {
            adc,
            pins,
            name,
            resolution,
            configured: 0,
            _adc: PhantomData,
        }
    }

    /// Releases the ADC and the pins.
    pub fn release(self) -> (A, (P0, P1)) {
        (self.adc, self.pins)
    }

    fn convert(&mut self, channel: u8) -> Result<i16, Error<E>> {
        let raw = match channel {
            0 => nb::block!(<A as OneShot<ADC, u16, P0>>::read(
                &mut self.adc,
                &mut self.pins.0
            )),
            _ => nb::block!(<A as OneShot<ADC, u16, P1>>::read(
                &mut self.adc,
                &mut self.pins.1
            )),
        }
        .map_err(Error::Conversion)?;

        i16::try_from(raw).map_err(|_| Error::Resolution(self.resolution))
    }
}

impl<ADC, A, P0, P1, E> AdcDevice for OneShotAdc<'_, ADC, A, P0, P1>
where
    A: OneShot<ADC, u16, P0, Error = E> + OneShot<ADC, u16, P1, Error = E>,
    P0: Channel<ADC>,
    P1: Channel<ADC>,
    E: Debug,
{
    type Error = Error<E>;

    fn name(&self) -> &str {
        self.name
    }

    /// The HAL powers up and calibrates the ADC when it is constructed.
    fn is_ready(&self) -> bool {
        true
    }

    fn configure_channel(&mut self, config: &ChannelConfig) -> Result<(), Self::Error> {
        if config.channel_id >= CHANNEL_COUNT {
            return Err(Error::InvalidChannel(config.channel_id));
        }
        if config.gain != Gain::X1
            || config.reference != Reference::Internal
            || config.acquisition_time != AcquisitionTime::Default
            || config.differential
        {
            return Err(Error::Unsupported);
        }

        self.configured |= adc::channel_mask(config.channel_id);
        Ok(())
    }

    fn read(&mut self, sequence: &mut Sequence<'_>) -> Result<(), Self::Error> {
        if sequence.resolution != self.resolution {
            return Err(Error::Resolution(sequence.resolution));
        }
        let channels = sequence.channels;
        if channels == 0 {
            return Err(Error::InvalidChannel(0));
        }
        let unknown = channels & !ALL_CHANNELS;
        if unknown != 0 {
            return Err(Error::InvalidChannel(unknown.trailing_zeros() as u8));
        }
        let unconfigured = channels & !self.configured;
        if unconfigured != 0 {
            return Err(Error::NotConfigured(unconfigured.trailing_zeros() as u8));
        }
        if sequence.buffer.len() < sequence.channel_count() {
            return Err(Error::BufferTooSmall);
        }

        let mut slots = sequence.buffer.iter_mut();
        for channel in (0..CHANNEL_COUNT).filter(|c| channels & adc::channel_mask(*c) != 0) {
            let value = self.convert(channel)?;
            if let Some(slot) = slots.next() {
                *slot = value;
            }
        }
        Ok(())
    }
}
