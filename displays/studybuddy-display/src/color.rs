//! RGB565 colour helpers

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;

pub use studybuddy_core::face::color565;

/// Convert a packed RGB565 value to the `embedded-graphics` colour type
pub fn rgb565(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}
