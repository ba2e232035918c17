// Copyright 2026 The adc-sampler authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sampling run configuration

use crate::adc::ChannelConfig;

/// Number of loop iterations in a run.
pub const NUM_SAMPLES: u32 = 1000;

/// Delay after each iteration, in ms.
pub const SAMPLE_INTERVAL_MS: u32 = 10;

/// Every this many iterations the converted samples are printed.
pub const LOG_EVERY: u32 = 100;

/// Reference voltage in mV. Lowered from 3.3 V to 1.65 V.
pub const VREF_MV: i32 = 1650;

/// ADC resolution in bits.
pub const RESOLUTION: u8 = 12;

/// The two channels sampled by default.
pub const CHANNELS: [ChannelConfig; 2] = [
    ChannelConfig::single_ended(0),
    ChannelConfig::single_ended(1),
];

/// Configuration of a sampling run over `N` channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplerConfig<const N: usize = 2> {
    pub samples: u32,
    pub interval_ms: u32,
    /// 0 disables sample logging.
    pub log_every: u32,
    pub vref_mv: i32,
    pub resolution: u8,
    pub channels: [ChannelConfig; N],
}

impl<const N: usize> SamplerConfig<N> {
    /// Default timing and conversion parameters over the given channels.
    pub fn with_channels(channels: [ChannelConfig; N]) -> Self {
        Self {
            samples: NUM_SAMPLES,
            interval_ms: SAMPLE_INTERVAL_MS,
            log_every: LOG_EVERY,
            vref_mv: VREF_MV,
            resolution: RESOLUTION,
            channels,
        }
    }

    pub fn samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn interval_ms(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn log_every(mut self, log_every: u32) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn vref_mv(mut self, vref_mv: i32) -> Self {
        self.vref_mv = vref_mv;
        self
    }

    pub fn resolution(mut self, resolution: u8) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn channels(mut self, channels: [ChannelConfig; N]) -> Self {
        self.channels = channels;
        self
    }

    /// Whether iteration `index` prints its converted samples.
    pub fn logs_sample(&self, index: u32) -> bool {
        index.checked_rem(self.log_every) == Some(0)
    }
}

impl SamplerConfig {
    /// The build-time defaults: [`NUM_SAMPLES`] iterations over [`CHANNELS`].
    pub fn new() -> Self {
        Self::with_channels(CHANNELS)
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adc::Gain;

    #[test]
    fn default_matches_constants() {
        let config: SamplerConfig = SamplerConfig::default();
        assert_eq!(config, SamplerConfig::new());
        assert_eq!(config.samples, 1000);
        assert_eq!(config.interval_ms, 10);
        assert_eq!(config.log_every, 100);
        assert_eq!(config.vref_mv, 1650);
        assert_eq!(config.resolution, 12);
        assert_eq!(config.channels[0].channel_id, 0);
        assert_eq!(config.channels[1].channel_id, 1);
        assert!(config.channels.iter().all(|c| c.gain == Gain::X1 && !c.differential));
    }

    #[test]
    fn builder_overrides() {
        let config = SamplerConfig::new()
            .samples(10)
            .interval_ms(0)
            .log_every(5)
            .resolution(10);
        assert_eq!(config.samples, 10);
        assert_eq!(config.interval_ms, 0);
        assert_eq!(config.log_every, 5);
        assert_eq!(config.resolution, 10);
    }

    #[test]
    fn logs_every_hundredth_sample() {
        let config = SamplerConfig::new();
        let logged: usize = (0..1000).filter(|s| config.logs_sample(*s)).count();
        assert_eq!(logged, 10);
        assert!(config.logs_sample(0));
        assert!(config.logs_sample(900));
        assert!(!config.logs_sample(99));
    }

    #[test]
    fn zero_interval_never_logs() {
        let config = SamplerConfig::new().log_every(0);
        assert!(!config.logs_sample(0));
        assert!(!config.logs_sample(100));
    }
}
