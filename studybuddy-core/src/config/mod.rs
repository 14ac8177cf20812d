//! Configuration types
//!
//! Board-agnostic configuration structures and the parser for the
//! `device.toml` file embedded in the firmware.

pub mod parse;
pub mod pins;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use pins::{parse_pin_string, GpioAllocator, GPIO_COUNT, LCD_SPI_PINS};
pub use types::*;
