// Copyright 2026 The adc-sampler authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Simulated hardware shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use adc_sampler::adc::{AdcDevice, ChannelConfig, ErrorKind, Sequence};
use adc_sampler::clock::Uptime;
use embedded_hal::delay::DelayNs;

/// Simulated time, advanced only by delays and by simulated conversion latency.
#[derive(Clone, Default)]
pub struct SimClock {
    ns: Rc<Cell<u64>>,
    sleeps: Rc<Cell<u32>>,
}

impl SimClock {
    pub fn advance_ns(&self, ns: u64) {
        self.ns.set(self.ns.get() + ns);
    }

    pub fn now_ms(&self) -> u32 {
        (self.ns.get() / 1_000_000) as u32
    }

    /// Number of delay calls so far.
    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }
}

impl Uptime for SimClock {
    fn uptime_ms(&mut self) -> u32 {
        self.now_ms()
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.advance_ns(ns.into());
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.advance_ns(u64::from(ms) * 1_000_000);
    }
}

/// An ADC returning a fixed value per channel.
pub struct FakeAdc {
    pub ready: bool,
    pub values: [i16; 2],
    /// Channel whose configuration is rejected.
    pub fail_setup: Option<u8>,
    /// Read calls (0-based, counted across channels) that fail.
    pub fail_reads: Vec<usize>,
    pub read_latency_ns: u64,
    pub setup_attempts: Vec<u8>,
    pub configured: Vec<u8>,
    /// Channel mask of every read call.
    pub reads: Vec<u32>,
    pub clock: SimClock,
}

impl FakeAdc {
    pub fn new(clock: SimClock) -> Self {
        Self {
            ready: true,
            values: [4095, 2048],
            fail_setup: None,
            fail_reads: Vec::new(),
            read_latency_ns: 500_000,
            setup_attempts: Vec::new(),
            configured: Vec::new(),
            reads: Vec::new(),
            clock,
        }
    }
}

impl AdcDevice for FakeAdc {
    type Error = ErrorKind;

    fn name(&self) -> &str {
        "fake-adc"
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn configure_channel(&mut self, config: &ChannelConfig) -> Result<(), ErrorKind> {
        self.setup_attempts.push(config.channel_id);
        if self.fail_setup == Some(config.channel_id) {
            return Err(ErrorKind::Unsupported);
        }
        self.configured.push(config.channel_id);
        Ok(())
    }

    fn read(&mut self, sequence: &mut Sequence<'_>) -> Result<(), ErrorKind> {
        let call = self.reads.len();
        self.reads.push(sequence.channels);
        self.clock.advance_ns(self.read_latency_ns);

        if self.fail_reads.contains(&call) {
            return Err(ErrorKind::Io);
        }
        let channel = sequence.channels.trailing_zeros() as usize;
        let value = *self.values.get(channel).ok_or(ErrorKind::InvalidInput)?;
        let slot = sequence.buffer.first_mut().ok_or(ErrorKind::OutOfMemory)?;
        *slot = value;
        Ok(())
    }
}

/// A console that refuses every write.
pub struct BrokenConsole;

impl fmt::Write for BrokenConsole {
    fn write_str(&mut self, _: &str) -> fmt::Result {
        Err(fmt::Error)
    }
}

/// Lines of `output` that print a converted sample of `channel`.
pub fn sample_lines(output: &str, channel: u8) -> Vec<&str> {
    let tag = format!(" CH{channel}: raw=");
    output
        .lines()
        .filter(|line| line.starts_with("Sample[") && line.contains(&tag))
        .collect()
}
