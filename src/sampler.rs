// Copyright 2026 The adc-sampler authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Sampling run
//!
//! A run binds the ADC, applies the channel configurations, samples every channel a fixed number
//! of times and prints a throughput summary. Everything happens in sequence on the caller's
//! stack; the only yield point is the delay between iterations.
//!
//! Errors come in two tiers. A [`SetupError`] ends the run before any sample is taken. A
//! [`ReadFailure`] only costs one sample: it is printed, counted and the run continues.

use core::fmt::Write;
use embedded_hal::delay::DelayNs;

use crate::adc::{self, AdcDevice, ChannelConfig, Error as _, Sequence};
use crate::clock::{self, Uptime};
use crate::config::SamplerConfig;
use crate::stats::Statistics;

// Console output is best effort, there is nowhere else to report a broken console.
macro_rules! say {
    ($console:expr, $($arg:tt)*) => {
        if writeln!($console, $($arg)*).is_err() {
            trace!("console write failed");
        }
    };
}

/// Fatal error before sampling starts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SetupError {
    /// The configured resolution cannot be converted.
    #[error("Unsupported ADC resolution: {0} bits")]
    InvalidResolution(u8),
    /// The device did not report ready.
    #[error("ADC device not ready")]
    DeviceNotReady,
    /// The driver rejected a channel configuration.
    #[error("Channel {channel} setup failed ({code})")]
    ChannelSetup { channel: u8, code: i32 },
}

/// A single failed read. Not fatal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("Sample[{index}] CH{channel}: read failed ({code})")]
pub struct ReadFailure {
    /// Loop iteration
    pub index: u32,
    /// Channel that failed
    pub channel: u8,
    /// Driver error code
    pub code: i32,
}

/// State owned by the sampling loop for the duration of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunState {
    /// One-sample buffer reused by every read. Channels are read strictly one after the other,
    /// reading them concurrently needs one buffer per channel.
    pub buffer: [i16; 1],
    /// Samples attempted. Grows by one per channel per iteration whether or not the read
    /// succeeded.
    pub total_samples: u32,
    /// Reads that failed.
    pub failed_reads: u32,
    /// Uptime when sampling started, in ms.
    pub start_ms: u32,
}

/// Samples the channels of an ADC and reports the achieved throughput.
pub struct Sampler<A, U, D, W, const N: usize = 2> {
    adc: A,
    uptime: U,
    delay: D,
    console: W,
    config: SamplerConfig<N>,
}

impl<A, U, D, W, const N: usize> Sampler<A, U, D, W, N>
where
    A: AdcDevice,
    U: Uptime,
    D: DelayNs,
    W: Write,
{
    pub fn new(adc: A, uptime: U, delay: D, console: W, config: SamplerConfig<N>) -> Self {
        Self {
            adc,
            uptime,
            delay,
            console,
            config,
        }
    }

    pub fn config(&self) -> &SamplerConfig<N> {
        &self.config
    }

    /// Gives back the ADC, uptime source, delay and console.
    pub fn release(self) -> (A, U, D, W) {
        (self.adc, self.uptime, self.delay, self.console)
    }

    /// Performs a complete run.
    ///
    /// Setup errors are printed on the console before they are returned. Read errors never make
    /// the run fail.
    pub fn run(&mut self) -> Result<Statistics, SetupError> {
        say!(self.console, "Booting High-Speed ADC test...");

        self.bind()?;
        self.configure_channels()?;
        let state = self.sample();
        Ok(self.report(state))
    }

    /// Checks the configuration and that the device is ready.
    fn bind(&mut self) -> Result<(), SetupError> {
        let resolution = self.config.resolution;
        if resolution == 0 || resolution > adc::MAX_RESOLUTION {
            say!(self.console, "Unsupported ADC resolution: {} bits", resolution);
            error!("unsupported resolution {}", resolution);
            return Err(SetupError::InvalidResolution(resolution));
        }

        if !self.adc.is_ready() {
            say!(self.console, "ADC device not ready: {}", self.adc.name());
            error!("ADC device {} not ready", self.adc.name());
            return Err(SetupError::DeviceNotReady);
        }

        say!(self.console, "ADC device: {}", self.adc.name());
        Ok(())
    }

    /// Applies the channel configurations in order. Stops at the first failure.
    fn configure_channels(&mut self) -> Result<(), SetupError> {
        for config in &self.config.channels {
            if let Err(e) = self.adc.configure_channel(config) {
                let channel = config.channel_id;
                let code = e.code();
                say!(self.console, "Channel {} setup failed ({})", channel, code);
                error!("channel {} setup failed ({})", channel, code);
                return Err(SetupError::ChannelSetup { channel, code });
            }
            debug!("channel {} configured", config.channel_id);
        }
        Ok(())
    }

    fn sample(&mut self) -> RunState {
        let config = self.config;
        let mut state = RunState::default();

        say!(self.console, "Starting ADC sampling...");
        state.start_ms = self.uptime.uptime_ms();

        for index in 0..config.samples {
            for channel in &config.channels {
                if let Err(failure) = self.sample_channel(&mut state, index, channel) {
                    state.failed_reads = state.failed_reads.saturating_add(1);
                    say!(self.console, "{}", failure);
                    warn!(
                        "read of channel {} failed at sample {} ({})",
                        failure.channel,
                        failure.index,
                        failure.code
                    );
                }
            }
            state.total_samples = state.total_samples.saturating_add(N as u32);
            self.delay.delay_ms(config.interval_ms);
        }

        state
    }

    /// Reads one channel into the shared buffer and prints it if this iteration is logged.
    fn sample_channel(
        &mut self,
        state: &mut RunState,
        index: u32,
        channel: &ChannelConfig,
    ) -> Result<(), ReadFailure> {
        let mut sequence = Sequence::new(&mut state.buffer, self.config.resolution);
        sequence.select(channel.channel_id);
        self.adc.read(&mut sequence).map_err(|e| ReadFailure {
            index,
            channel: channel.channel_id,
            code: e.code(),
        })?;

        let raw = state.buffer[0];
        let mv = adc::raw_to_millivolts(
            self.config.vref_mv,
            channel.gain,
            self.config.resolution,
            raw.into(),
        );
        if self.config.logs_sample(index) {
            match mv {
                Some(mv) => say!(
                    self.console,
                    "Sample[{}] CH{}: raw={}, {}mV",
                    index,
                    channel.channel_id,
                    raw,
                    mv
                ),
                None => say!(
                    self.console,
                    "Sample[{}] CH{}: raw={}, out of range",
                    index,
                    channel.channel_id,
                    raw
                ),
            }
        }
        Ok(())
    }

    fn report(&mut self, state: RunState) -> Statistics {
        let now = self.uptime.uptime_ms();
        let stats = Statistics::new(
            state.total_samples,
            state.failed_reads,
            clock::elapsed_ms(state.start_ms, now),
        );

        if stats.report(&mut self.console).is_err() {
            trace!("console write failed");
        }
        say!(self.console, "Done after {} samples", self.config.samples);
        info!(
            "{} samples in {} ms, {} Hz",
            stats.total_samples,
            stats.elapsed_ms,
            stats.rate_hz
        );

        stats
    }
}
