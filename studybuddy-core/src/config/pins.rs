//! GPIO allocation and pin strings
//!
//! Tracks which GPIO pins a configuration uses to catch wiring conflicts
//! before any hardware is touched.

/// Maximum number of user GPIO pins (RP2040)
pub const GPIO_COUNT: usize = 30;

/// GPIOs hard-wired to the LCD's SPI1 bus (clock, data)
pub const LCD_SPI_PINS: [u8; 2] = [10, 11];

/// GPIO allocator to track pin usage
#[derive(Debug, Clone, Copy, Default)]
pub struct GpioAllocator {
    /// Bitmask of allocated GPIO pins
    allocated: u32,
}

impl GpioAllocator {
    /// Create a new GPIO allocator
    pub const fn new() -> Self {
        Self { allocated: 0 }
    }

    /// Allocate a GPIO pin
    ///
    /// Returns `Err(())` if the pin is out of range or already in use.
    #[allow(clippy::result_unit_err)]
    pub fn allocate(&mut self, pin: u8) -> Result<(), ()> {
        if pin as usize >= GPIO_COUNT {
            return Err(());
        }
        let mask = 1 << pin;
        if self.allocated & mask != 0 {
            return Err(());
        }
        self.allocated |= mask;
        Ok(())
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio3" -> (3, false)
/// - "^gpio3" -> (3, true) (internal pull-up enabled)
pub fn parse_pin_string(s: &str) -> Option<(u8, bool)> {
    let s = s.trim();

    let (s, pull_up) = match s.strip_prefix('^') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let num_str = s.strip_prefix("gpio")?;
    let pin: u8 = num_str.parse().ok()?;

    if pin as usize >= GPIO_COUNT {
        return None;
    }

    Some((pin, pull_up))
}
