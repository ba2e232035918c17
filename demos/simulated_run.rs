//! Runs the full sampling test on the host against a simulated two-channel ADC.
//!
//! Channel 0 sees a slow triangle wave, channel 1 a constant half-scale input. Sleeping and
//! uptime use the host clock, so the run takes about ten seconds, just like on hardware.

use std::convert::Infallible;
use std::io::Write as _;
use std::thread;
use std::time::{Duration, Instant};

use adc_sampler::clock::Uptime;
use adc_sampler::config;
use adc_sampler::console::Console;
use adc_sampler::oneshot::OneShotAdc;
use adc_sampler::{Sampler, SamplerConfig};
use embedded_hal::delay::DelayNs;
use embedded_hal_02::adc::{Channel, OneShot};

/// 12-bit converter fed by two simulated inputs.
struct SimulatedAdc {
    conversions: u32,
}

/// Triangle wave input
struct Wave;
/// Half-scale input
struct Bias;

impl Channel<SimulatedAdc> for Wave {
    type ID = u8;

    fn channel() -> u8 {
        0
    }
}

impl Channel<SimulatedAdc> for Bias {
    type ID = u8;

    fn channel() -> u8 {
        1
    }
}

impl<P: Channel<SimulatedAdc, ID = u8>> OneShot<SimulatedAdc, u16, P> for SimulatedAdc {
    type Error = Infallible;

    fn read(&mut self, _pin: &mut P) -> nb::Result<u16, Infallible> {
        self.conversions += 1;
        let value = match P::channel() {
            0 => {
                let phase = (self.conversions * 8) % 8190;
                if phase < 4095 { phase } else { 8190 - phase }
            }
            _ => 2048,
        };
        Ok(value as u16)
    }
}

struct HostClock {
    boot: Instant,
}

impl Uptime for HostClock {
    fn uptime_ms(&mut self) -> u32 {
        self.boot.elapsed().as_millis() as u32
    }
}

impl DelayNs for HostClock {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns.into()));
    }
}

/// Standard output as an `embedded_io` byte sink, standing in for a UART.
struct Stdout(std::io::Stdout);

impl embedded_io::ErrorType for Stdout {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for Stdout {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.0.write(buf).map_err(|_| embedded_io::ErrorKind::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush().map_err(|_| embedded_io::ErrorKind::Other)
    }
}

fn main() {
    let clock = HostClock {
        boot: Instant::now(),
    };
    let delay = HostClock {
        boot: clock.boot,
    };
    let adc: OneShotAdc<'_, SimulatedAdc, _, _, _> = OneShotAdc::new(
        SimulatedAdc { conversions: 0 },
        (Wave, Bias),
        "sim-adc",
        config::RESOLUTION,
    );
    let console = Console::new(Stdout(std::io::stdout()));

    let mut sampler = Sampler::new(adc, clock, delay, console, SamplerConfig::new());
    // Failures have been printed already and the test always exits successfully.
    let _ = sampler.run();

    let (_, _, _, mut console) = sampler.release();
    let _ = console.flush();
}
