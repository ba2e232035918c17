// Copyright 2026 The adc-sampler authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Two-channel ADC sampling and throughput test
//!
//! Configures two channels of an ADC, samples both of them a fixed number of times at a fixed
//! cadence, converts the raw readings to millivolts and prints a throughput summary. The sampler
//! is written against traits so that it runs the same on a microcontroller and on the host:
//!
//! - [`adc::AdcDevice`] for the converter. `oneshot::OneShotAdc` implements it for any ADC that
//!   implements the [`embedded-hal`] 0.2 `OneShot` trait.
//! - [`clock::Uptime`] for a monotonic millisecond counter.
//! - [`embedded_hal::delay::DelayNs`] for the delay between iterations.
//! - [`core::fmt::Write`] for the console. [`console::Console`] adapts an
//!   [`embedded_io::Write`] sink such as a UART.
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal
//!
//! # Usage
//!
//! ```rust,ignore
//! let adc = OneShotAdc::new(hal_adc, (pa0, pa1), "ADC", config::RESOLUTION);
//! let mut sampler = Sampler::new(adc, uptime, delay, Console::new(tx), SamplerConfig::new());
//!
//! // Setup errors have already been printed; there is nothing left to do with them.
//! let _ = sampler.run();
//! ```
//!
//! ## Features
//!
//! - `embedded-hal-02` (default): the `oneshot` adapter.
//! - `log` or `defmt`: diagnostics through the respective logging framework, in addition to the
//!   console output.

#![cfg_attr(not(test), no_std)]
#![deny(rustdoc::broken_intra_doc_links)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod adc;
pub mod clock;
pub mod config;
pub mod console;
#[cfg(feature = "embedded-hal-02")]
pub mod oneshot;
pub mod sampler;
pub mod stats;

pub use adc::AdcDevice;
pub use config::SamplerConfig;
pub use sampler::{ReadFailure, RunState, Sampler, SetupError};
pub use stats::Statistics;
