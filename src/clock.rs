// Copyright 2026 The adc-sampler authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Monotonic time source

/// A monotonic millisecond counter since boot.
///
/// The counter is 32 bits wide and wraps after roughly 49.7 days; use [`elapsed_ms`] to take
/// differences.
pub trait Uptime {
    /// Milliseconds since boot.
    fn uptime_ms(&mut self) -> u32;
}

impl<T: Uptime + ?Sized> Uptime for &mut T {
    fn uptime_ms(&mut self) -> u32 {
        T::uptime_ms(self)
    }
}

/// Milliseconds from `start` to `now`, across at most one wrap of the counter.
pub fn elapsed_ms(start: u32, now: u32) -> u32 {
    now.wrapping_sub(start)
}
