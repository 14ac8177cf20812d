//! RP2040-specific HAL for the StudyBuddy firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `studybuddy-hal` traits:
//!
//! - Direction-switchable GPIO ([`gpio::FlexPin`])
//! - Microsecond time base backed by the embassy time driver
//! - Dynamic pin allocation for config-driven setup

#![no_std]

pub mod clock;
pub mod gpio;
pub mod pins;

pub use clock::EmbassyClock;
pub use gpio::FlexPin;
pub use pins::{LcdBus, PinBank, PinError};

/// Echo input ready for pulse timing
pub type EchoPin<'d> = studybuddy_hal::TimedInput<FlexPin<'d>, EmbassyClock>;
