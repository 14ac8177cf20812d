//! Configuration type definitions
//!
//! These types describe the dock hardware and the behaviour of the
//! presence pipeline. Defaults match the reference build: HC-SR04 on
//! GPIO2/GPIO3 and a 240x240 GC9A01 on SPI1.

use super::pins::{GpioAllocator, GPIO_COUNT, LCD_SPI_PINS};
use crate::presence::DEFAULT_THRESHOLD_CM;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Threshold is zero, negative or not a finite number
    InvalidThreshold,
    /// Trigger or echo timing outside what the sensor accepts
    InvalidTiming,
    /// Pin number out of range
    InvalidPin,
    /// Same GPIO assigned to more than one function
    PinConflict,
    /// GPIO belongs to the LCD bus and cannot be assigned
    ReservedPin,
    /// Face radius too small to lay out eyes and mouth
    InvalidRadius,
}

/// Ultrasonic sensor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Presence threshold (cm)
    pub threshold_cm: f32,
    /// Low time before the trigger pulse (µs)
    pub settle_us: u32,
    /// Trigger pulse width (µs)
    pub trigger_pulse_us: u32,
    /// Maximum time to wait for an echo (µs)
    pub echo_timeout_us: u32,
    /// Delay between the samples of one filtered reading (ms)
    pub sample_interval_ms: u32,
}

/// Minimum trigger pulse the HC-SR04 reacts to (µs)
pub const MIN_TRIGGER_PULSE_US: u32 = 10;

/// Minimum settle time before a trigger pulse (µs)
pub const MIN_SETTLE_US: u32 = 2;

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            threshold_cm: DEFAULT_THRESHOLD_CM,
            settle_us: MIN_SETTLE_US,
            trigger_pulse_us: MIN_TRIGGER_PULSE_US,
            echo_timeout_us: 25_000,
            sample_interval_ms: 10,
        }
    }
}

impl SensorConfig {
    /// Default configuration with a custom threshold
    pub fn with_threshold(threshold_cm: f32) -> Result<Self, ConfigError> {
        let config = Self {
            threshold_cm,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold_cm.is_finite() || self.threshold_cm <= 0.0 {
            return Err(ConfigError::InvalidThreshold);
        }
        if self.settle_us < MIN_SETTLE_US
            || self.trigger_pulse_us < MIN_TRIGGER_PULSE_US
            || self.echo_timeout_us == 0
        {
            return Err(ConfigError::InvalidTiming);
        }
        Ok(())
    }
}

/// Face layout configuration
///
/// Everything else about the face (eyes, mouth, mask) is derived from the
/// centre and radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceConfig {
    /// Face centre X (px)
    pub center_x: i32,
    /// Face centre Y (px)
    pub center_y: i32,
    /// Face radius (px)
    pub radius: i32,
    /// Caption cursor X (px)
    pub caption_x: i32,
    /// Caption cursor Y (px)
    pub caption_y: i32,
    /// Caption text size multiplier
    pub text_size: u8,
    /// Screen colour behind the caption (RGB565)
    pub background_color: u16,
}

/// Smallest radius that still gives one-pixel eyes
pub const MIN_FACE_RADIUS: i32 = 10;

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            center_x: 120,
            center_y: 120,
            radius: 90,
            caption_x: 65,
            caption_y: 210,
            text_size: 2,
            background_color: 0xFFFF,
        }
    }
}

impl FaceConfig {
    /// Check the configuration invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius < MIN_FACE_RADIUS {
            return Err(ConfigError::InvalidRadius);
        }
        Ok(())
    }
}

/// Pin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self { pin, pull_up: true }
    }
}

/// Display control lines
///
/// Clock and data run on the board's fixed SPI pins; only the control
/// lines are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayHwConfig {
    /// Data/command select
    pub dc_pin: PinConfig,
    /// Chip select (active low)
    pub cs_pin: PinConfig,
    /// Reset (active low)
    pub rst_pin: PinConfig,
    /// Backlight enable
    pub backlight_pin: Option<PinConfig>,
    /// SPI clock frequency (Hz)
    pub spi_hz: u32,
}

impl Default for DisplayHwConfig {
    fn default() -> Self {
        Self {
            dc_pin: PinConfig::new(8),
            cs_pin: PinConfig::new(9),
            rst_pin: PinConfig::new(12),
            backlight_pin: Some(PinConfig::new(25)),
            spi_hz: 32_000_000,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Ultrasonic sensor behaviour
    pub sensor: SensorConfig,
    /// Face layout
    pub face: FaceConfig,
    /// Sensor trigger pin
    pub trigger_pin: PinConfig,
    /// Sensor echo pin
    pub echo_pin: PinConfig,
    /// Display control lines
    pub display: DisplayHwConfig,
    /// Time between presence polls (ms)
    pub poll_interval_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            sensor: SensorConfig::default(),
            face: FaceConfig::default(),
            trigger_pin: PinConfig::new(2),
            echo_pin: PinConfig::new(3),
            display: DisplayHwConfig::default(),
            poll_interval_ms: 100,
        }
    }
}

impl DeviceConfig {
    /// Check every section, that no GPIO is used twice and that none of
    /// them is an LCD bus pin
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sensor.validate()?;
        self.face.validate()?;

        let mut gpio = GpioAllocator::new();
        for pin in self.pins() {
            if pin.pin as usize >= GPIO_COUNT {
                return Err(ConfigError::InvalidPin);
            }
            if LCD_SPI_PINS.contains(&pin.pin) {
                return Err(ConfigError::ReservedPin);
            }
            gpio.allocate(pin.pin)
                .map_err(|_| ConfigError::PinConflict)?;
        }
        Ok(())
    }

    /// All GPIOs this configuration claims
    pub fn pins(&self) -> impl Iterator<Item = PinConfig> {
        [
            Some(self.trigger_pin),
            Some(self.echo_pin),
            Some(self.display.dc_pin),
            Some(self.display.cs_pin),
            Some(self.display.rst_pin),
            self.display.backlight_pin,
        ]
        .into_iter()
        .flatten()
    }
}
