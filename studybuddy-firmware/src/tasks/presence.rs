//! Presence polling task
//!
//! Samples the sensor on a fixed cadence and repaints the face for the
//! result. The sensor read itself blocks for tens of milliseconds; nothing
//! else runs on this executor, so that is fine.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Delay, Duration, Ticker};

use studybuddy_core::face::Expression;
use studybuddy_display::FaceDisplay;
use studybuddy_drivers::sensor::UltrasonicSensor;
use studybuddy_hal_rp2040::{EchoPin, FlexPin};

use crate::gc9a01::Gc9a01;

/// The dock's HC-SR04
pub type DockSensor = UltrasonicSensor<FlexPin<'static>, EchoPin<'static>, Delay>;

/// The face on the round LCD
pub type DockDisplay =
    FaceDisplay<Gc9a01<Spi<'static, SPI1, Blocking>, Output<'static>, Output<'static>>>;

/// Presence task - polls the sensor and redraws the face
#[embassy_executor::task]
pub async fn presence_task(mut sensor: DockSensor, mut display: DockDisplay, poll_interval_ms: u32) {
    info!("Presence task started");

    let mut ticker = Ticker::every(Duration::from_millis(poll_interval_ms as u64));
    let mut last: Option<Expression> = None;

    loop {
        let expression = Expression::from_presence(sensor.presence());

        if last != Some(expression) {
            info!("Face: {} ({})", expression, expression.caption());
            last = Some(expression);
        }

        // Full repaint every cycle; a failed frame is retried on the next tick
        if let Err(e) = display.draw(expression) {
            warn!("Display error: {}", e);
        }

        ticker.next().await;
    }
}
