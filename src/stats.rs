// Copyright 2026 The adc-sampler authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Throughput statistics of a sampling run

use core::fmt;

/// Summary of a finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Statistics {
    /// Samples attempted, including failed reads.
    pub total_samples: u32,
    /// Reads that returned an error.
    pub failed_reads: u32,
    /// Wall-clock duration of the run in ms, as measured.
    pub elapsed_ms: u32,
    /// Attempted samples per second, truncated.
    pub rate_hz: u32,
}

impl Statistics {
    /// Computes the sampling rate as `total_samples * 1000 / elapsed_ms` in integer arithmetic.
    ///
    /// A run shorter than the clock resolution measures 0 ms; the rate is then computed over
    /// 1 ms while `elapsed_ms` keeps the measured value.
    pub fn new(total_samples: u32, failed_reads: u32, elapsed_ms: u32) -> Self {
        let divisor = u64::from(elapsed_ms.max(1));
        let rate = u64::from(total_samples) * 1000 / divisor;

        Self {
            total_samples,
            failed_reads,
            elapsed_ms,
            rate_hz: u32::try_from(rate).unwrap_or(u32::MAX),
        }
    }

    /// Samples that were actually acquired.
    pub fn acquired_samples(&self) -> u32 {
        self.total_samples.saturating_sub(self.failed_reads)
    }

    /// Prints the performance summary block.
    pub fn report<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        writeln!(w)?;
        writeln!(w, "--- Performance Statistics ---")?;
        writeln!(w, "Total samples: {}", self.total_samples)?;
        writeln!(w, "Failed reads: {}", self.failed_reads)?;
        writeln!(w, "Elapsed time: {} ms", self.elapsed_ms)?;
        writeln!(w, "Sampling rate: {} Hz", self.rate_hz)?;
        writeln!(w, "-----------------------------")
    }
}
