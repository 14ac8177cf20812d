//! StudyBuddy - Phone Dock Firmware
//!
//! Main firmware binary for the RP2040 round LCD board. An HC-SR04 in the
//! dock decides whether the phone is in; the GC9A01 shows a smile while it
//! is and a frown while it is not.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::Peri;
use embassy_time::Delay;
use embedded_graphics::draw_target::DrawTarget;
use {defmt_rtt as _, panic_probe as _};

use studybuddy_core::config::PinConfig;
use studybuddy_display::{rgb565, FaceDisplay};
use studybuddy_drivers::sensor::UltrasonicSensor;
use studybuddy_hal::TimedInput;
use studybuddy_hal_rp2040::{EmbassyClock, FlexPin, PinBank, PinError};

use crate::config::load_config;
use crate::gc9a01::Gc9a01;

mod config;
mod gc9a01;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("StudyBuddy firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let (mut pins, lcd_bus) = PinBank::from_peripherals(p);
    info!("Peripherals initialized");

    let config = load_config();

    // Display control lines
    let dc = take_output(&mut pins, config.display.dc_pin, Level::Low);
    let cs = take_output(&mut pins, config.display.cs_pin, Level::High);
    let mut rst = take_output(&mut pins, config.display.rst_pin, Level::High);

    let mut spi_config = SpiConfig::default();
    spi_config.frequency = config.display.spi_hz;
    let spi = Spi::new_blocking_txonly(lcd_bus.spi, lcd_bus.clk, lcd_bus.mosi, spi_config);

    let mut lcd = Gc9a01::new(spi, dc, cs);
    if let Err(e) = lcd.init(&mut rst, &mut Delay) {
        error!("LCD init failed: {}", e);
    }

    let mut display = FaceDisplay::new(lcd, config.face);
    if let Err(e) = display
        .canvas_mut()
        .clear(rgb565(config.face.background_color))
    {
        warn!("LCD clear failed: {}", e);
    }

    // Backlight on once the panel shows something sensible
    let backlight = config
        .display
        .backlight_pin
        .map(|pin| take_output(&mut pins, pin, Level::High));
    info!("Display initialized");

    // Ultrasonic sensor
    let trigger = take_flex(&mut pins, config.trigger_pin);
    let echo = TimedInput::new(take_flex(&mut pins, config.echo_pin), EmbassyClock);
    let mut sensor = UltrasonicSensor::new(trigger, echo, Delay, config.sensor);
    sensor.begin();
    info!("Sensor initialized (threshold {} cm)", sensor.threshold_cm());

    unwrap!(spawner.spawn(tasks::presence_task(
        sensor,
        display,
        config.poll_interval_ms
    )));

    // Dropping an Output releases the pin; reset and backlight must stay driven
    core::mem::forget(rst);
    core::mem::forget(backlight);
}

/// Take a configured pin from the bank
///
/// A missing pin is a wiring error the firmware cannot recover from.
fn take_pin(pins: &mut PinBank, pin: PinConfig) -> Peri<'static, AnyPin> {
    match pins.take(pin.pin) {
        Ok(p) => p,
        Err(PinError::InvalidPin) => defmt::panic!("gpio{} does not exist", pin.pin),
        Err(PinError::AlreadyTaken) => defmt::panic!("gpio{} is already in use", pin.pin),
    }
}

fn take_output(pins: &mut PinBank, pin: PinConfig, initial: Level) -> Output<'static> {
    Output::new(take_pin(pins, pin), initial)
}

fn take_flex(pins: &mut PinBank, pin: PinConfig) -> FlexPin<'static> {
    FlexPin::new(take_pin(pins, pin), pin.pull_up)
}
