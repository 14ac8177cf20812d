//! End-to-end: echo timings through the sensor, the presence decision and
//! the face renderer into a frame buffer.

use std::collections::VecDeque;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;
use studybuddy_core::config::{FaceConfig, SensorConfig};
use studybuddy_core::face::{Expression, FaceRenderState};
use studybuddy_display::{render, rgb565, FaceDisplay};
use studybuddy_drivers::sensor::UltrasonicSensor;
use studybuddy_hal::{ConfigurablePin, Level, OutputPin, PinMode, PulseInput};

struct Trigger {
    high: bool,
}

impl OutputPin for Trigger {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

impl ConfigurablePin for Trigger {
    fn set_mode(&mut self, _mode: PinMode) {}
}

struct Echo {
    pulses: VecDeque<Option<u32>>,
}

impl PulseInput for Echo {
    fn pulse_in(&mut self, _level: Level, _timeout_us: u32) -> Option<u32> {
        self.pulses.pop_front().flatten()
    }
}

impl ConfigurablePin for Echo {
    fn set_mode(&mut self, _mode: PinMode) {}
}

/// Delay that only adds up the time it was asked to wait
#[derive(Default)]
struct ElapsedDelay {
    ns: u64,
}

impl DelayNs for ElapsedDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ns += ns as u64;
    }
}

const SIDE: usize = 240;

struct Framebuffer {
    pixels: Vec<Rgb565>,
}

impl Framebuffer {
    fn new() -> Self {
        Self {
            pixels: vec![Rgb565::WHITE; SIDE * SIDE],
        }
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(SIDE as u32, SIDE as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if (0..SIDE as i32).contains(&p.x) && (0..SIDE as i32).contains(&p.y) {
                self.pixels[p.y as usize * SIDE + p.x as usize] = color;
            }
        }
        Ok(())
    }
}

fn sensor(pulses: &[Option<u32>]) -> UltrasonicSensor<Trigger, Echo, ElapsedDelay> {
    let mut sensor = UltrasonicSensor::new(
        Trigger { high: false },
        Echo {
            pulses: pulses.iter().copied().collect(),
        },
        ElapsedDelay::default(),
        SensorConfig::default(),
    );
    sensor.begin();
    sensor
}

/// One poll of the dock: sense, pick a face, draw it
fn poll(pulses: &[Option<u32>], display: &mut FaceDisplay<Framebuffer>) -> Expression {
    let mut dock_sensor = sensor(pulses);
    let expression = Expression::from_presence(dock_sensor.presence());
    display.draw(expression).unwrap();
    expression
}

fn expected_frame(expression: Expression) -> Vec<Rgb565> {
    let mut frame = Framebuffer::new();
    let face = FaceRenderState::new(&FaceConfig::default(), expression);
    render(&mut frame, &face).unwrap();
    frame.pixels
}

#[test]
fn test_close_reading_with_outlier_shows_phone_out() {
    // ≈ 0.81, 0.89 and 5.01 cm: median 0.89 is below the 1 cm threshold
    let mut display = FaceDisplay::new(Framebuffer::new(), FaceConfig::default());
    let expression = poll(&[Some(47), Some(52), Some(292)], &mut display);

    assert_eq!(expression, Expression::Absent);
    assert_eq!(expression.caption(), "Phone Out :(");
    assert!(display.release().pixels == expected_frame(Expression::Absent));
}

#[test]
fn test_missing_echoes_show_phone_in() {
    // 999, 999 and ≈ 2.0 cm: median is the sentinel
    let mut display = FaceDisplay::new(Framebuffer::new(), FaceConfig::default());
    let expression = poll(&[None, None, Some(117)], &mut display);

    assert_eq!(expression, Expression::Present);
    assert_eq!(expression.caption(), "Phone In :)");
    assert!(display.release().pixels == expected_frame(Expression::Present));
}

#[test]
fn test_repeated_polls_are_stable() {
    let mut display = FaceDisplay::new(Framebuffer::new(), FaceConfig::default());
    for _ in 0..3 {
        poll(&[None, None, None], &mut display);
    }
    assert!(display.release().pixels == expected_frame(Expression::Present));
}

#[test]
fn test_phone_removed_after_docking() {
    let mut display = FaceDisplay::new(Framebuffer::new(), FaceConfig::default());
    assert_eq!(poll(&[None, None, None], &mut display), Expression::Present);
    assert_eq!(
        poll(&[Some(40), Some(41), Some(42)], &mut display),
        Expression::Absent
    );

    let pixels = display.release().pixels;
    assert!(pixels == expected_frame(Expression::Absent));
    assert_eq!(pixels[195 * SIDE + 120], rgb565(0xFE60));
}

#[test]
fn test_filtered_reading_waits_between_samples() {
    let mut dock_sensor = sensor(&[Some(100), Some(100), Some(100)]);
    dock_sensor.filtered_distance();

    let (trigger, _echo, delay) = dock_sensor.release();
    assert!(trigger.is_set_low());
    // Two 10 ms gaps plus three 2 µs + 10 µs trigger sequences
    assert_eq!(delay.ns, 2 * 10_000_000 + 3 * 12_000);
}
