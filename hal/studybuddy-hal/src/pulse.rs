//! Pulse timing abstractions
//!
//! Time-of-flight sensors report distance as the width of a pulse on their
//! echo line. [`PulseInput`] measures that width; [`TimedInput`] provides a
//! portable busy-polling implementation on top of any [`InputPin`] and
//! [`MicrosClock`].

use crate::gpio::{ConfigurablePin, InputPin, Level, PinMode};

/// Free-running microsecond time base
pub trait MicrosClock {
    /// Microseconds since an arbitrary epoch
    ///
    /// Must be monotonic over the lifetime of a single measurement.
    fn now_us(&self) -> u64;
}

/// Input that can time the width of a pulse
pub trait PulseInput {
    /// Measure how long the input stays at `level`
    ///
    /// Waits for any pulse already in progress to finish, then for the
    /// next pulse to start, and times it until it ends. `timeout_us` bounds
    /// the whole operation.
    ///
    /// Returns the pulse width in microseconds, or `None` if no complete
    /// pulse was seen before the timeout.
    fn pulse_in(&mut self, level: Level, timeout_us: u32) -> Option<u32>;
}

/// Busy-polling pulse timer over a plain input pin
pub struct TimedInput<P, C> {
    pin: P,
    clock: C,
}

impl<P, C> TimedInput<P, C> {
    /// Wrap a pin and a clock
    pub fn new(pin: P, clock: C) -> Self {
        Self { pin, clock }
    }
}

impl<P: InputPin, C: MicrosClock> TimedInput<P, C> {
    /// Spin while the pin reads `level`
    ///
    /// Returns the time the level changed, or `None` once `deadline` passes.
    fn wait_while(&self, level: Level, deadline: u64) -> Option<u64> {
        loop {
            let now = self.clock.now_us();
            if self.pin.level() != level {
                return Some(now);
            }
            if now >= deadline {
                return None;
            }
        }
    }
}

impl<P: InputPin, C: MicrosClock> PulseInput for TimedInput<P, C> {
    fn pulse_in(&mut self, level: Level, timeout_us: u32) -> Option<u32> {
        let idle = match level {
            Level::High => Level::Low,
            Level::Low => Level::High,
        };
        let deadline = self.clock.now_us().saturating_add(timeout_us as u64);

        // Previous pulse still in progress
        self.wait_while(level, deadline)?;
        // Idle until the pulse starts
        let start = self.wait_while(idle, deadline)?;
        let end = self.wait_while(level, deadline)?;

        Some(end.saturating_sub(start).min(u32::MAX as u64) as u32)
    }
}

impl<P: ConfigurablePin, C> ConfigurablePin for TimedInput<P, C> {
    fn set_mode(&mut self, mode: PinMode) {
        self.pin.set_mode(mode);
    }
}
