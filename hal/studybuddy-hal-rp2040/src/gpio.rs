//! GPIO implementations
//!
//! Wraps the embassy `Flex` pin so the sensor driver can pick the pin
//! direction itself in `begin()`.

use embassy_rp::gpio::{AnyPin, Flex, Pull};
use embassy_rp::Peri;
use studybuddy_hal::{ConfigurablePin, InputPin, OutputPin, PinMode};

/// GPIO pin whose direction is set at runtime
pub struct FlexPin<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexPin<'d> {
    /// Take a pin from the bank; it starts as an input
    pub fn new(pin: Peri<'d, AnyPin>, pull_up: bool) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(if pull_up { Pull::Up } else { Pull::None });
        Self { pin }
    }
}

impl OutputPin for FlexPin<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

impl InputPin for FlexPin<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl ConfigurablePin for FlexPin<'_> {
    fn set_mode(&mut self, mode: PinMode) {
        match mode {
            PinMode::Input => self.pin.set_as_input(),
            PinMode::Output => self.pin.set_as_output(),
        }
    }
}
