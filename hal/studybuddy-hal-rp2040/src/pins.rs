//! Dynamic pin allocation for config-driven hardware setup
//!
//! Provides a way to get GPIO pins by number at runtime, so the sensor and
//! display control lines can be moved in `device.toml` without touching
//! the firmware source.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{PIN_10, PIN_11, SPI1};
use embassy_rp::{Peri, Peripherals};

/// Number of user GPIO pins on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken, or reserved for a fixed peripheral function
    AlreadyTaken,
}

/// Pin bank that holds GPIO pins and allows taking them by number
///
/// Slots left as `None` at construction (the LCD clock and data pins,
/// which the board routes to SPI1) are reported as already taken.
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

/// Peripherals the LCD bus needs, split off before the pin bank is built
pub struct LcdBus {
    pub spi: Peri<'static, SPI1>,
    pub clk: Peri<'static, PIN_10>,
    pub mosi: Peri<'static, PIN_11>,
}

impl PinBank {
    /// Create a new pin bank, indexed by GPIO number
    pub fn new(pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT]) -> Self {
        Self { pins }
    }

    /// Split the Embassy peripherals into the LCD bus and a bank of the
    /// remaining GPIOs
    pub fn from_peripherals(p: Peripherals) -> (Self, LcdBus) {
        let bus = LcdBus {
            spi: p.SPI1,
            clk: p.PIN_10,
            mosi: p.PIN_11,
        };
        let bank = Self::new([
            Some(p.PIN_0.into()),
            Some(p.PIN_1.into()),
            Some(p.PIN_2.into()),
            Some(p.PIN_3.into()),
            Some(p.PIN_4.into()),
            Some(p.PIN_5.into()),
            Some(p.PIN_6.into()),
            Some(p.PIN_7.into()),
            Some(p.PIN_8.into()),
            Some(p.PIN_9.into()),
            None,
            None,
            Some(p.PIN_12.into()),
            Some(p.PIN_13.into()),
            Some(p.PIN_14.into()),
            Some(p.PIN_15.into()),
            Some(p.PIN_16.into()),
            Some(p.PIN_17.into()),
            Some(p.PIN_18.into()),
            Some(p.PIN_19.into()),
            Some(p.PIN_20.into()),
            Some(p.PIN_21.into()),
            Some(p.PIN_22.into()),
            Some(p.PIN_23.into()),
            Some(p.PIN_24.into()),
            Some(p.PIN_25.into()),
            Some(p.PIN_26.into()),
            Some(p.PIN_27.into()),
            Some(p.PIN_28.into()),
            Some(p.PIN_29.into()),
        ]);
        (bank, bus)
    }

    /// Take a pin by number
    ///
    /// Returns the pin if available, or an error if:
    /// - Pin number is invalid (>= 30)
    /// - Pin was already taken or is reserved for the LCD bus
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}
