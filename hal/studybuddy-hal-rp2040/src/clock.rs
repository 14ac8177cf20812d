//! Microsecond clock
//!
//! The embassy RP2040 time driver ticks at 1 MHz, so `Instant` already has
//! the resolution needed to time ultrasonic echoes.

use embassy_time::Instant;
use studybuddy_hal::MicrosClock;

/// Clock reading the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MicrosClock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
