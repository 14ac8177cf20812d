//! GC9A01 round LCD driver
//!
//! Driver for the 240x240 GC9A01 panel over a write-only SPI bus.
//! Implements `embedded-graphics`' `DrawTarget` so the face renderer can
//! draw on it directly. There is no frame buffer: every primitive streams
//! straight into panel RAM through an address window.

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Panel width and height (px)
pub const SIZE: u32 = 240;

/// Pixels streamed per SPI write when filling
const FILL_CHUNK: usize = 32;

/// GC9A01 commands
mod cmd {
    pub const SLEEP_OUT: u8 = 0x11;
    pub const INVERSION_ON: u8 = 0x21;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDR: u8 = 0x2A;
    pub const ROW_ADDR: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const TEARING_ON: u8 = 0x35;
    pub const MEMORY_ACCESS: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
    pub const INTER_ENABLE_1: u8 = 0xFE;
    pub const INTER_ENABLE_2: u8 = 0xEF;
}

/// Power-on register sequence (command, parameters)
///
/// Most of these are undocumented vendor registers; the values are the
/// ones the panel vendor ships for this module.
const INIT_SEQUENCE: &[(u8, &[u8])] = &[
    (cmd::INTER_ENABLE_2, &[]),
    (0xEB, &[0x14]),
    (cmd::INTER_ENABLE_1, &[]),
    (cmd::INTER_ENABLE_2, &[]),
    (0xEB, &[0x14]),
    (0x84, &[0x40]),
    (0x85, &[0xFF]),
    (0x86, &[0xFF]),
    (0x87, &[0xFF]),
    (0x88, &[0x0A]),
    (0x89, &[0x21]),
    (0x8A, &[0x00]),
    (0x8B, &[0x80]),
    (0x8C, &[0x01]),
    (0x8D, &[0x01]),
    (0x8E, &[0xFF]),
    (0x8F, &[0xFF]),
    (0xB6, &[0x00, 0x20]),
    (cmd::MEMORY_ACCESS, &[0x08]), // BGR order
    (cmd::PIXEL_FORMAT, &[0x05]),  // 16 bits per pixel
    (0x90, &[0x08, 0x08, 0x08, 0x08]),
    (0xBD, &[0x06]),
    (0xBC, &[0x00]),
    (0xFF, &[0x60, 0x01, 0x04]),
    (0xC3, &[0x13]),
    (0xC4, &[0x13]),
    (0xC9, &[0x22]),
    (0xBE, &[0x11]),
    (0xE1, &[0x10, 0x0E]),
    (0xDF, &[0x21, 0x0C, 0x02]),
    (0xF0, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    (0xF1, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    (0xF2, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    (0xF3, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    (0xED, &[0x1B, 0x0B]),
    (0xAE, &[0x77]),
    (0xCD, &[0x63]),
    (
        0x70,
        &[0x07, 0x07, 0x04, 0x0E, 0x0F, 0x09, 0x07, 0x08, 0x03],
    ),
    (0xE8, &[0x34]),
    (
        0x62,
        &[
            0x18, 0x0D, 0x71, 0xED, 0x70, 0x70, 0x18, 0x0F, 0x71, 0xEF, 0x70, 0x70,
        ],
    ),
    (
        0x63,
        &[
            0x18, 0x11, 0x71, 0xF1, 0x70, 0x70, 0x18, 0x13, 0x71, 0xF3, 0x70, 0x70,
        ],
    ),
    (0x64, &[0x28, 0x29, 0xF1, 0x01, 0xF1, 0x00, 0x07]),
    (
        0x66,
        &[0x3C, 0x00, 0xCD, 0x67, 0x45, 0x45, 0x10, 0x00, 0x00, 0x00],
    ),
    (
        0x67,
        &[0x00, 0x3C, 0x00, 0x00, 0x00, 0x01, 0x54, 0x10, 0x32, 0x98],
    ),
    (0x74, &[0x10, 0x85, 0x80, 0x00, 0x00, 0x4E, 0x00]),
    (0x98, &[0x3E, 0x07]),
    (cmd::TEARING_ON, &[]),
    (cmd::INVERSION_ON, &[]),
];

/// LCD errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LcdError {
    /// SPI transfer failed
    Spi,
    /// Control line could not be driven
    Pin,
}

/// GC9A01 driver
pub struct Gc9a01<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS> Gc9a01<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a new driver; call [`init`](Self::init) before drawing
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self { spi, dc, cs }
    }

    /// Hardware reset and power-on sequence
    pub fn init<RST: OutputPin>(
        &mut self,
        rst: &mut RST,
        delay: &mut impl DelayNs,
    ) -> Result<(), LcdError> {
        self.cs.set_high().map_err(|_| LcdError::Pin)?;
        rst.set_high().map_err(|_| LcdError::Pin)?;
        delay.delay_ms(100);
        rst.set_low().map_err(|_| LcdError::Pin)?;
        delay.delay_ms(100);
        rst.set_high().map_err(|_| LcdError::Pin)?;
        delay.delay_ms(120);

        for &(command, params) in INIT_SEQUENCE {
            self.command(command, params)?;
        }

        self.command(cmd::SLEEP_OUT, &[])?;
        delay.delay_ms(120);
        self.command(cmd::DISPLAY_ON, &[])?;
        delay.delay_ms(20);

        Ok(())
    }

    /// Send a command and its parameters
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), LcdError> {
        self.cs.set_low().map_err(|_| LcdError::Pin)?;
        let result = self.command_inner(command, params);
        self.cs.set_high().map_err(|_| LcdError::Pin)?;
        result
    }

    fn command_inner(&mut self, command: u8, params: &[u8]) -> Result<(), LcdError> {
        self.dc.set_low().map_err(|_| LcdError::Pin)?;
        self.spi.write(&[command]).map_err(|_| LcdError::Spi)?;
        self.spi.flush().map_err(|_| LcdError::Spi)?;
        if !params.is_empty() {
            self.dc.set_high().map_err(|_| LcdError::Pin)?;
            self.spi.write(params).map_err(|_| LcdError::Spi)?;
            self.spi.flush().map_err(|_| LcdError::Spi)?;
        }
        Ok(())
    }

    /// Point panel RAM writes at `area`, which must lie on the panel
    fn set_window(&mut self, area: &Rectangle) -> Result<(), LcdError> {
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let (x0, y0) = (area.top_left.x as u16, area.top_left.y as u16);
        let (x1, y1) = (bottom_right.x as u16, bottom_right.y as u16);

        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.command(cmd::COLUMN_ADDR, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::ROW_ADDR, &[y0h, y0l, y1h, y1l])
    }

    /// Stream pixels into the current window
    fn write_pixels(&mut self, colors: impl IntoIterator<Item = Rgb565>) -> Result<(), LcdError> {
        self.cs.set_low().map_err(|_| LcdError::Pin)?;
        let result = self.write_pixels_inner(colors);
        self.cs.set_high().map_err(|_| LcdError::Pin)?;
        result
    }

    fn write_pixels_inner(
        &mut self,
        colors: impl IntoIterator<Item = Rgb565>,
    ) -> Result<(), LcdError> {
        self.command_inner(cmd::MEMORY_WRITE, &[])?;
        self.dc.set_high().map_err(|_| LcdError::Pin)?;

        let mut buf = [0u8; FILL_CHUNK * 2];
        let mut len = 0;
        for color in colors {
            let raw = RawU16::from(color).into_inner().to_be_bytes();
            buf[len..len + 2].copy_from_slice(&raw);
            len += 2;
            if len == buf.len() {
                self.spi.write(&buf).map_err(|_| LcdError::Spi)?;
                len = 0;
            }
        }
        if len > 0 {
            self.spi.write(&buf[..len]).map_err(|_| LcdError::Spi)?;
        }
        self.spi.flush().map_err(|_| LcdError::Spi)
    }
}

impl<SPI, DC, CS> OriginDimensions for Gc9a01<SPI, DC, CS> {
    fn size(&self) -> Size {
        Size::new(SIZE, SIZE)
    }
}

impl<SPI, DC, CS> DrawTarget for Gc9a01<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    type Color = Rgb565;
    type Error = LcdError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            self.set_window(&Rectangle::new(point, Size::new(1, 1)))?;
            self.write_pixels([color])?;
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let clipped = area.intersection(&self.bounding_box());
        if clipped != *area {
            // Partly off-panel: fall back to per-pixel writes
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(point, color)| Pixel(point, color)),
            );
        }
        if area.is_zero_sized() {
            return Ok(());
        }
        self.set_window(area)?;
        self.write_pixels(colors)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }
        self.set_window(&area)?;
        let count = area.size.width as usize * area.size.height as usize;
        self.write_pixels(core::iter::repeat(color).take(count))
    }
}
