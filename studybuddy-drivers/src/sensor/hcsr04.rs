//! HC-SR04 ultrasonic distance sensor
//!
//! A 10 µs pulse on TRIG starts a measurement; the sensor answers with a
//! pulse on ECHO as long as the sound's round trip. Readings are noisy, so
//! presence decisions use the median of three readings.
//!
//! All waits are blocking. A filtered reading is three echo waits of at
//! most 25 ms each plus two 10 ms gaps between samples.

use embedded_hal::delay::DelayNs;
use studybuddy_core::config::SensorConfig;
use studybuddy_core::filter::median3;
use studybuddy_core::presence::{echo_to_distance_cm, is_present};
use studybuddy_hal::{ConfigurablePin, Level, OutputPin, PinMode, PulseInput};

/// HC-SR04 driver
///
/// Owns its trigger and echo lines and the delay used for the trigger
/// pulse and the spacing between samples.
pub struct UltrasonicSensor<T, E, D> {
    trigger: T,
    echo: E,
    delay: D,
    config: SensorConfig,
}

impl<T, E, D> UltrasonicSensor<T, E, D>
where
    T: OutputPin + ConfigurablePin,
    E: PulseInput + ConfigurablePin,
    D: DelayNs,
{
    /// Create a new sensor
    ///
    /// The pins are not touched until [`begin`](Self::begin).
    pub fn new(trigger: T, echo: E, delay: D, config: SensorConfig) -> Self {
        Self {
            trigger,
            echo,
            delay,
            config,
        }
    }

    /// Configure the pins: trigger as output held low, echo as input
    pub fn begin(&mut self) {
        self.trigger.set_mode(PinMode::Output);
        self.trigger.set_low();
        self.echo.set_mode(PinMode::Input);
    }

    /// Take one reading (cm)
    ///
    /// Returns `NO_ECHO_CM` (999.0) when no echo arrives in time.
    pub fn read_raw_distance(&mut self) -> f32 {
        self.trigger.set_low();
        self.delay.delay_us(self.config.settle_us);
        self.trigger.set_high();
        self.delay.delay_us(self.config.trigger_pulse_us);
        self.trigger.set_low();

        let echo_us = self.echo.pulse_in(Level::High, self.config.echo_timeout_us);
        let distance = echo_to_distance_cm(echo_us);

        #[cfg(feature = "defmt")]
        defmt::trace!("HC-SR04: echo {} us -> {} cm", echo_us, distance);

        distance
    }

    /// Median of three readings (cm)
    pub fn filtered_distance(&mut self) -> f32 {
        let a = self.read_raw_distance();
        self.delay.delay_ms(self.config.sample_interval_ms);
        let b = self.read_raw_distance();
        self.delay.delay_ms(self.config.sample_interval_ms);
        let c = self.read_raw_distance();

        median3(a, b, c)
    }

    /// Whether the phone is docked
    ///
    /// True when the filtered distance is at or above the threshold; see
    /// `studybuddy_core::presence` for why the comparison points that way.
    pub fn presence(&mut self) -> bool {
        let distance = self.filtered_distance();
        let present = is_present(distance, self.config.threshold_cm);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "HC-SR04: {} cm (threshold {}) present={}",
            distance,
            self.config.threshold_cm,
            present
        );

        present
    }

    /// Filtered distance for diagnostics (cm)
    pub fn distance_cm(&mut self) -> f32 {
        self.filtered_distance()
    }
}

impl<T, E, D> UltrasonicSensor<T, E, D> {
    /// Presence threshold (cm)
    pub fn threshold_cm(&self) -> f32 {
        self.config.threshold_cm
    }

    /// Sensor configuration
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Give back the trigger pin, echo input and delay
    pub fn release(self) -> (T, E, D) {
        (self.trigger, self.echo, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use proptest::prelude::*;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::vec;
    use std::vec::Vec;
    use studybuddy_core::presence::NO_ECHO_CM;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        TriggerMode(PinMode),
        Trigger(Level),
        EchoMode(PinMode),
        DelayNs(u32),
        DelayUs(u32),
        DelayMs(u32),
        PulseIn(Level, u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct MockTrigger {
        log: Log,
        high: bool,
    }

    impl OutputPin for MockTrigger {
        fn set_high(&mut self) {
            self.high = true;
            self.log.borrow_mut().push(Event::Trigger(Level::High));
        }

        fn set_low(&mut self) {
            self.high = false;
            self.log.borrow_mut().push(Event::Trigger(Level::Low));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    impl ConfigurablePin for MockTrigger {
        fn set_mode(&mut self, mode: PinMode) {
            self.log.borrow_mut().push(Event::TriggerMode(mode));
        }
    }

    /// Echo input that replays scripted pulse widths, then times out
    struct ScriptedEcho {
        log: Log,
        pulses: VecDeque<Option<u32>>,
    }

    impl PulseInput for ScriptedEcho {
        fn pulse_in(&mut self, level: Level, timeout_us: u32) -> Option<u32> {
            self.log.borrow_mut().push(Event::PulseIn(level, timeout_us));
            self.pulses.pop_front().flatten()
        }
    }

    impl ConfigurablePin for ScriptedEcho {
        fn set_mode(&mut self, mode: PinMode) {
            self.log.borrow_mut().push(Event::EchoMode(mode));
        }
    }

    struct RecordingDelay {
        log: Log,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::DelayNs(ns));
        }

        fn delay_us(&mut self, us: u32) {
            self.log.borrow_mut().push(Event::DelayUs(us));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::DelayMs(ms));
        }
    }

    type TestSensor = UltrasonicSensor<MockTrigger, ScriptedEcho, RecordingDelay>;

    fn sensor_with(pulses: &[Option<u32>], config: SensorConfig) -> (TestSensor, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sensor = UltrasonicSensor::new(
            MockTrigger {
                log: log.clone(),
                high: false,
            },
            ScriptedEcho {
                log: log.clone(),
                pulses: pulses.iter().copied().collect(),
            },
            RecordingDelay { log: log.clone() },
            config,
        );
        (sensor, log)
    }

    fn make_sensor(pulses: &[Option<u32>]) -> (TestSensor, Log) {
        sensor_with(pulses, SensorConfig::default())
    }

    fn trigger_sequence() -> [Event; 6] {
        [
            Event::Trigger(Level::Low),
            Event::DelayUs(2),
            Event::Trigger(Level::High),
            Event::DelayUs(10),
            Event::Trigger(Level::Low),
            Event::PulseIn(Level::High, 25_000),
        ]
    }

    #[test]
    fn test_begin_configures_pins() {
        let (mut sensor, log) = make_sensor(&[]);
        sensor.begin();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::TriggerMode(PinMode::Output),
                Event::Trigger(Level::Low),
                Event::EchoMode(PinMode::Input),
            ]
        );
    }

    #[test]
    fn test_trigger_pulse_sequence() {
        let (mut sensor, log) = make_sensor(&[Some(583)]);
        sensor.read_raw_distance();
        assert_eq!(log.borrow().as_slice(), &trigger_sequence());
    }

    #[test]
    fn test_raw_distance_conversion() {
        let (mut sensor, _) = make_sensor(&[Some(583)]);
        let d = sensor.read_raw_distance();
        assert!((d - 9.998).abs() < 0.01, "d = {}", d);
    }

    #[test]
    fn test_timeout_returns_sentinel() {
        let (mut sensor, _) = make_sensor(&[None]);
        assert_eq!(sensor.read_raw_distance(), NO_ECHO_CM);
    }

    #[test]
    fn test_zero_width_echo_returns_sentinel() {
        let (mut sensor, _) = make_sensor(&[Some(0)]);
        assert_eq!(sensor.read_raw_distance(), 999.0);
    }

    #[test]
    fn test_filtered_sampling_schedule() {
        let (mut sensor, log) = make_sensor(&[Some(100), Some(200), Some(300)]);
        sensor.filtered_distance();

        let mut expected = Vec::new();
        expected.extend_from_slice(&trigger_sequence());
        expected.push(Event::DelayMs(10));
        expected.extend_from_slice(&trigger_sequence());
        expected.push(Event::DelayMs(10));
        expected.extend_from_slice(&trigger_sequence());
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn test_filtered_rejects_outlier() {
        // ≈ 0.806, 0.892, 5.008 cm
        let (mut sensor, _) = make_sensor(&[Some(47), Some(52), Some(292)]);
        let d = sensor.filtered_distance();
        assert_eq!(d, echo_to_distance_cm(Some(52)));
    }

    #[test]
    fn test_timeouts_take_part_in_median() {
        let (mut sensor, _) = make_sensor(&[None, None, Some(117)]);
        assert_eq!(sensor.filtered_distance(), NO_ECHO_CM);

        let (mut sensor, _) = make_sensor(&[None, Some(117), Some(120)]);
        assert_eq!(sensor.filtered_distance(), echo_to_distance_cm(Some(120)));
    }

    #[test]
    fn test_presence_at_threshold() {
        let threshold = echo_to_distance_cm(Some(58));
        let config = SensorConfig::with_threshold(threshold).unwrap();

        let (mut sensor, _) = sensor_with(&[Some(58); 3], config);
        assert!(sensor.presence());

        let (mut sensor, _) = sensor_with(&[Some(57); 3], config);
        assert!(!sensor.presence());

        let (mut sensor, _) = sensor_with(&[Some(59); 3], config);
        assert!(sensor.presence());
    }

    #[test]
    fn test_presence_scenarios() {
        // Close reading with one outlier: absent
        let (mut sensor, _) = make_sensor(&[Some(47), Some(52), Some(292)]);
        assert!(!sensor.presence());

        // Mostly timeouts: present
        let (mut sensor, _) = make_sensor(&[None, None, Some(117)]);
        assert!(sensor.presence());
    }

    #[test]
    fn test_custom_timing() {
        let config = SensorConfig {
            settle_us: 5,
            trigger_pulse_us: 20,
            echo_timeout_us: 30_000,
            sample_interval_ms: 60,
            ..SensorConfig::default()
        };
        let (mut sensor, log) = sensor_with(&[], config);
        sensor.filtered_distance();

        let log = log.borrow();
        assert_eq!(log[1], Event::DelayUs(5));
        assert_eq!(log[3], Event::DelayUs(20));
        assert_eq!(log[5], Event::PulseIn(Level::High, 30_000));
        assert_eq!(log[6], Event::DelayMs(60));
        assert!(!log.iter().any(|e| matches!(e, Event::DelayNs(_))));
    }

    #[test]
    fn test_accessors_and_release() {
        let config = SensorConfig::with_threshold(2.5).unwrap();
        let (sensor, _) = sensor_with(&[Some(1)], config);
        assert_eq!(sensor.threshold_cm(), 2.5);
        assert_eq!(sensor.config().echo_timeout_us, 25_000);

        let (trigger, echo, _delay) = sensor.release();
        assert!(trigger.is_set_low());
        assert_eq!(echo.pulses.len(), 1);
    }

    #[test]
    fn test_distance_cm_is_filtered() {
        let (mut sensor, log) = make_sensor(&[Some(47), Some(52), Some(292)]);
        assert_eq!(sensor.distance_cm(), echo_to_distance_cm(Some(52)));
        let pulses = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::PulseIn(..)))
            .count();
        assert_eq!(pulses, 3);
    }

    proptest! {
        #[test]
        fn prop_filtered_is_one_of_the_samples(
            a in proptest::option::of(1u32..30_000),
            b in proptest::option::of(1u32..30_000),
            c in proptest::option::of(1u32..30_000),
        ) {
            let (mut sensor, _) = make_sensor(&[a, b, c]);
            let d = sensor.filtered_distance();
            let samples = [a, b, c].map(echo_to_distance_cm);
            prop_assert!(samples.contains(&d));
            prop_assert!(d > 0.0);
        }

        #[test]
        fn prop_presence_matches_threshold(us in 1u32..2_000, threshold in 0.1f32..50.0) {
            let config = SensorConfig::with_threshold(threshold).unwrap();
            let (mut sensor, _) = sensor_with(&[Some(us); 3], config);
            let expected = echo_to_distance_cm(Some(us)) >= threshold;
            prop_assert_eq!(sensor.presence(), expected);
        }
    }
}
