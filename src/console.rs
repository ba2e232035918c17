// Copyright 2026 The adc-sampler authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text console over a byte sink

use core::fmt;
use embedded_io::Write;

/// Adapts an [`embedded_io::Write`] byte sink (usually a UART transmitter) to
/// [`core::fmt::Write`], so that it can be handed to the sampler as its console.
pub struct Console<W> {
    writer: W,
}

impl<W: Write> Console<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Releases the underlying writer.
    pub fn release(self) -> W {
        self.writer
    }

    /// Blocks until everything written so far has left the sink.
    pub fn flush(&mut self) -> Result<(), W::Error> {
        self.writer.flush()
    }
}

impl<W: Write> fmt::Write for Console<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.writer.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write as _;

    #[test]
    fn formats_into_byte_sink() {
        let mut buffer = [0u8; 32];
        let mut console = Console::new(&mut buffer[..]);
        writeln!(console, "Total samples: {}", 2000).unwrap();
        let remaining = console.release().len();

        let written = 32 - remaining;
        assert_eq!(&buffer[..written], b"Total samples: 2000\n");
    }

    #[test]
    fn full_sink_is_a_format_error() {
        let mut buffer = [0u8; 4];
        let mut console = Console::new(&mut buffer[..]);
        assert!(write!(console, "too long").is_err());
    }
}
