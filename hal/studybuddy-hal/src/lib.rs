//! StudyBuddy Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the presence sensor
//! is written against. Chip-specific crates (currently RP2040) implement
//! them, so the sensor driver and its tests never touch a register.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  studybuddy-drivers (UltrasonicSensor)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  studybuddy-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ studybuddy-   │
//!             │  hal-rp2040   │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::ConfigurablePin`] - Digital I/O
//! - [`pulse::MicrosClock`] - Free-running microsecond time base
//! - [`pulse::PulseInput`] - Timed pulse measurement (`pulseIn` style)
//!
//! Blocking delays are not redefined here; drivers take any
//! `embedded_hal::delay::DelayNs`.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pulse;

// Re-export key traits at crate root for convenience
pub use gpio::{ConfigurablePin, InputPin, Level, OutputPin, PinMode};
pub use pulse::{MicrosClock, PulseInput, TimedInput};
